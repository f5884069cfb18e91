// ============================================================================
// APP STATE - application-wide state
// ============================================================================
// Built once at startup from injected transport and storage. Cloning is cheap
// and every clone shares the same session, screen and notice.
// ============================================================================

use std::rc::Rc;

use crate::services::{
    ApiClient, AttendanceService, AuthService, DashboardService, DocumentService, HttpTransport,
    ProfileService,
};
use crate::state::reactivity::ReactiveState;
use crate::state::session_state::{Session, SessionHandle, SessionPhase, SessionState};
use crate::utils::storage::{CredentialStore, KeyValueStorage};
use crate::viewmodels::{
    AttendanceViewModel, DashboardViewModel, DocumentsViewModel, ProfileViewModel, SessionManager,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Dashboard,
    Attendance,
    Documents,
    Profile,
}

impl Screen {
    pub fn is_public(&self) -> bool {
        matches!(self, Screen::Login | Screen::Register)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Login => "Sign in",
            Screen::Register => "Create account",
            Screen::Dashboard => "Dashboard",
            Screen::Attendance => "Attendance",
            Screen::Documents => "Documents",
            Screen::Profile => "Profile",
        }
    }

    /// Landing screen after sign-in
    pub fn home_for(session: &Session) -> Screen {
        if session.is_admin() {
            Screen::Dashboard
        } else {
            Screen::Attendance
        }
    }

    /// Screen actually shown for a requested one, given the session
    pub fn resolve(self, session: &Session) -> Screen {
        match session.phase() {
            SessionPhase::Bootstrapping | SessionPhase::Unauthenticated if !self.is_public() => Screen::Login,
            SessionPhase::Authenticated if self.is_public() => Screen::home_for(session),
            _ => self,
        }
    }
}

/// Banner shown above the current screen
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

#[derive(Clone)]
pub struct AppState {
    pub session: SessionHandle,
    pub manager: SessionManager,
    pub api: ApiClient,
    pub screen: ReactiveState<Screen>,
    pub notice: ReactiveState<Option<Notice>>,
}

impl AppState {
    pub fn new(base_url: &str, transport: Rc<dyn HttpTransport>, storage: Rc<dyn KeyValueStorage>) -> Self {
        let credentials = CredentialStore::new(storage);
        let api = ApiClient::new(base_url, transport, credentials.clone());
        let manager = SessionManager::new(AuthService::new(api.clone()), SessionState::new(), credentials);

        Self {
            session: manager.session(),
            manager,
            api,
            screen: ReactiveState::new(Screen::Login),
            notice: ReactiveState::new(None),
        }
    }

    pub fn current_screen(&self) -> Screen {
        self.screen.get().resolve(&self.session.snapshot())
    }

    pub fn navigate(&self, screen: Screen) {
        log::info!("🧭 [NAV] {:?}", screen);
        self.notice.set(None);
        self.screen.set(screen);
    }

    pub fn navigate_home(&self) {
        self.navigate(Screen::home_for(&self.session.snapshot()));
    }

    pub fn show_info(&self, message: impl Into<String>) {
        self.notice.set(Some(Notice::Info(message.into())));
    }

    pub fn show_error(&self, message: impl Into<String>) {
        self.notice.set(Some(Notice::Error(message.into())));
    }

    pub fn sign_out(&self) {
        self.manager.sign_out();
        self.navigate(Screen::Login);
    }

    pub fn attendance(&self) -> AttendanceViewModel {
        AttendanceViewModel::new(AttendanceService::new(self.api.clone()), self.session.clone())
    }

    pub fn documents(&self) -> DocumentsViewModel {
        DocumentsViewModel::new(DocumentService::new(self.api.clone()), self.session.clone())
    }

    pub fn profile(&self) -> ProfileViewModel {
        ProfileViewModel::new(ProfileService::new(self.api.clone()), self.session.clone())
    }

    pub fn dashboard(&self) -> DashboardViewModel {
        DashboardViewModel::new(DashboardService::new(self.api.clone()), self.session.clone())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::services::testing::{json_response, FakeTransport};
    use crate::utils::storage::MemoryStorage;

    fn app(transport: &FakeTransport) -> AppState {
        let state = AppState::new(
            "http://api.test/api",
            Rc::new(transport.clone()),
            Rc::new(MemoryStorage::new()),
        );
        state.manager.bootstrap();
        state
    }

    fn login(role: &str) -> crate::services::http::HttpResponse {
        json_response(
            200,
            json!({"data": {"user": {"id": "1", "email": "a@b.com", "firstName": "A", "lastName": "B", "role": role}, "token": "tok"}}),
        )
    }

    #[test]
    fn anonymous_users_only_reach_public_screens() {
        let app = app(&FakeTransport::new());

        app.navigate(Screen::Documents);
        assert_eq!(app.current_screen(), Screen::Login);

        app.navigate(Screen::Register);
        assert_eq!(app.current_screen(), Screen::Register);
    }

    #[tokio::test]
    async fn home_depends_on_role() {
        let transport = FakeTransport::new();
        transport.push(login("admin"));
        transport.push(login("employee"));
        let app = app(&transport);

        app.manager.sign_in("a@b.com", "pw").await.unwrap();
        assert_eq!(app.current_screen(), Screen::Dashboard);

        app.sign_out();
        assert_eq!(app.current_screen(), Screen::Login);

        app.manager.sign_in("a@b.com", "pw").await.unwrap();
        app.navigate_home();
        assert_eq!(app.current_screen(), Screen::Attendance);
    }

    #[test]
    fn navigation_clears_notice() {
        let app = app(&FakeTransport::new());
        app.show_error("Invalid credentials");
        assert_eq!(app.notice.get(), Some(Notice::Error("Invalid credentials".to_string())));

        app.navigate(Screen::Register);

        assert_eq!(app.notice.get(), None);
    }
}
