// ============================================================================
// SESSION MANAGER - sign in / sign up / sign out
// ============================================================================
// The only writer of SessionState and of the persisted credential pair.
// Each sign-in takes a ticket from a generation counter; sign-out and
// bootstrap advance the counter too. A login response is applied only while
// its ticket is still current, so a slow response can never resurrect a
// session that was cleared or replaced in the meantime.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::models::{AuthError, Authenticated, SignupData};
use crate::services::AuthService;
use crate::state::{SessionHandle, SessionState};
use crate::utils::storage::CredentialStore;

#[derive(Clone)]
pub struct SessionManager {
    auth: AuthService,
    state: SessionState,
    credentials: CredentialStore,
    generation: Rc<Cell<u64>>,
}

impl SessionManager {
    pub fn new(auth: AuthService, state: SessionState, credentials: CredentialStore) -> Self {
        Self {
            auth,
            state,
            credentials,
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn session(&self) -> SessionHandle {
        self.state.handle()
    }

    pub fn is_admin(&self) -> bool {
        self.state.snapshot().is_admin()
    }

    fn advance(&self) -> u64 {
        let ticket = self.generation.get() + 1;
        self.generation.set(ticket);
        ticket
    }

    /// Runs once per process start. Auto-login is disabled: whatever was
    /// persisted before is discarded and the user must sign in again.
    pub fn bootstrap(&self) {
        log::info!("🚀 [SESSION] Bootstrap: clearing stored credentials, manual login required");
        self.advance();
        self.state.set_loading(true);
        self.credentials.clear();
        self.state.finish_bootstrap();
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let ticket = self.advance();
        let Authenticated { user, token } = self.auth.login(email, password).await?;

        if self.generation.get() != ticket {
            log::warn!("⚠️ [SESSION] Discarding stale login response for {}", user.email);
            return Err(AuthError::Superseded);
        }

        if let Err(e) = self.credentials.save(&user, &token) {
            log::error!("❌ [SESSION] Could not persist session: {}", e);
            self.state.set_user(None);
            return Err(AuthError::Storage);
        }

        log::info!("✅ [SESSION] Signed in as {} ({})", user.email, user.role);
        self.state.set_user(Some(user));
        Ok(())
    }

    /// Registration never establishes a session
    pub async fn sign_up(&self, email: &str, password: &str, data: SignupData) -> Result<(), AuthError> {
        self.auth.signup(email, password, data).await?;
        log::info!("✅ [SESSION] Account created for {}, waiting for manual login", email);
        Ok(())
    }

    /// Local only, cannot fail, idempotent
    pub fn sign_out(&self) {
        log::info!("👋 [SESSION] Sign out");
        self.advance();
        self.credentials.clear();
        self.state.set_user(None);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use serde_json::json;

    use super::*;
    use crate::models::{Credential, Role, User};
    use crate::services::http::TransportError;
    use crate::services::testing::{json_response, FakeTransport};
    use crate::services::ApiClient;
    use crate::state::SessionPhase;
    use crate::utils::constants::{STORAGE_KEY_AUTH_TOKEN, STORAGE_KEY_CURRENT_USER};
    use crate::utils::storage::{KeyValueStorage, MemoryStorage};

    struct Harness {
        manager: SessionManager,
        transport: FakeTransport,
        storage: MemoryStorage,
    }

    fn harness() -> Harness {
        let transport = FakeTransport::new();
        let storage = MemoryStorage::new();
        let credentials = CredentialStore::new(Rc::new(storage.clone()));
        let api = ApiClient::new("http://api.test/api", Rc::new(transport.clone()), credentials.clone());
        let manager = SessionManager::new(AuthService::new(api), SessionState::new(), credentials);
        manager.bootstrap();
        Harness {
            manager,
            transport,
            storage,
        }
    }

    fn login_ok(token: &str, role: &str) -> crate::services::http::HttpResponse {
        json_response(
            200,
            json!({"data": {"user": {"id": "1", "email": "a@b.com", "firstName": "A", "lastName": "B", "role": role}, "token": token}}),
        )
    }

    fn signup_data(role: Option<Role>) -> SignupData {
        SignupData {
            first_name: "N".to_string(),
            last_name: "X".to_string(),
            role,
        }
    }

    #[test]
    fn bootstrap_discards_previous_credentials() {
        let storage = MemoryStorage::new();
        let credentials = CredentialStore::new(Rc::new(storage.clone()));
        let user = User {
            id: "9".to_string(),
            email: "old@x.com".to_string(),
            first_name: "O".to_string(),
            last_name: "D".to_string(),
            role: Role::Admin,
        };
        credentials.save(&user, &Credential::new("still-valid")).unwrap();
        let api = ApiClient::new("http://api.test/api", Rc::new(FakeTransport::new()), credentials.clone());
        let state = SessionState::new();
        let manager = SessionManager::new(AuthService::new(api), state.clone(), credentials);
        assert_eq!(manager.session().phase(), SessionPhase::Bootstrapping);

        manager.bootstrap();

        assert!(storage.is_empty());
        assert_eq!(state.snapshot().user, None);
        assert!(!manager.session().is_loading());
        assert_eq!(manager.session().phase(), SessionPhase::Unauthenticated);
    }

    #[tokio::test]
    async fn successful_sign_in_publishes_and_persists() {
        let h = harness();
        h.transport.push(login_ok("tok123", "employee"));

        let result = h.manager.sign_in("a@b.com", "secret").await;

        assert_eq!(result, Ok(()));
        let user = h.manager.session().user().unwrap();
        assert_eq!(user.role, Role::Employee);
        assert!(!h.manager.is_admin());
        assert_eq!(h.storage.get(STORAGE_KEY_AUTH_TOKEN).as_deref(), Some("tok123"));
        let snapshot: User = serde_json::from_str(&h.storage.get(STORAGE_KEY_CURRENT_USER).unwrap()).unwrap();
        assert_eq!(snapshot, user);
    }

    #[tokio::test]
    async fn admin_sign_in_sets_admin_flag() {
        let h = harness();
        h.transport.push(login_ok("tok-admin", "admin"));

        h.manager.sign_in("a@b.com", "secret").await.unwrap();

        assert!(h.manager.is_admin());
        assert!(h.manager.session().is_admin());
    }

    #[tokio::test]
    async fn rejected_sign_in_leaves_session_untouched() {
        let h = harness();
        h.transport.push(json_response(401, json!({"error": "Invalid credentials"})));

        let result = h.manager.sign_in("a@b.com", "wrong").await;

        assert_eq!(result, Err(AuthError::Rejected("Invalid credentials".to_string())));
        assert_eq!(h.manager.session().user(), None);
        assert!(h.storage.is_empty());
    }

    #[tokio::test]
    async fn validation_details_are_joined() {
        let h = harness();
        h.transport.push(json_response(
            400,
            json!({"details": [{"msg": "Email required"}, {"msg": "Password too short"}]}),
        ));

        let err = h.manager.sign_in("", "x").await.unwrap_err();

        assert_eq!(err.to_string(), "Email required, Password too short");
        assert_eq!(h.manager.session().user(), None);
    }

    #[tokio::test]
    async fn network_failure_reports_generic_message() {
        let h = harness();
        h.transport.push_error(TransportError::Network("connection refused".to_string()));

        let err = h.manager.sign_in("a@b.com", "secret").await.unwrap_err();

        assert_eq!(err.to_string(), "Network error. Please try again.");
        assert_eq!(h.manager.session().user(), None);
    }

    #[tokio::test]
    async fn storage_failure_keeps_user_signed_out() {
        let h = harness();
        h.storage.set_read_only(true);
        h.transport.push(login_ok("tok123", "employee"));

        let result = h.manager.sign_in("a@b.com", "secret").await;

        assert_eq!(result, Err(AuthError::Storage));
        assert_eq!(h.manager.session().user(), None);
        assert!(h.storage.is_empty());
    }

    #[tokio::test]
    async fn failed_snapshot_write_signs_out_previous_user() {
        let h = harness();
        h.transport.push(login_ok("tok-a", "admin"));
        h.transport.push(login_ok("tok-b", "employee"));
        h.manager.sign_in("a@b.com", "secret").await.unwrap();
        h.storage.fail_writes_to(STORAGE_KEY_CURRENT_USER);

        let result = h.manager.sign_in("b@b.com", "secret").await;

        assert_eq!(result, Err(AuthError::Storage));
        assert_eq!(h.manager.session().user(), None);
        assert!(!h.manager.is_admin());
        assert_eq!(h.storage.get(STORAGE_KEY_AUTH_TOKEN), None);
        assert_eq!(h.storage.get(STORAGE_KEY_CURRENT_USER), None);
    }

    #[tokio::test]
    async fn sign_out_clears_everything_and_is_idempotent() {
        let h = harness();
        h.transport.push(login_ok("tok123", "admin"));
        h.manager.sign_in("a@b.com", "secret").await.unwrap();

        h.manager.sign_out();
        h.manager.sign_out();

        assert_eq!(h.manager.session().user(), None);
        assert!(!h.manager.is_admin());
        assert!(h.storage.is_empty());
        assert_eq!(h.manager.session().phase(), SessionPhase::Unauthenticated);
    }

    #[tokio::test]
    async fn sign_up_never_creates_a_session() {
        let h = harness();
        h.transport.push(json_response(201, json!({"success": true})));
        h.transport.push(json_response(400, json!({"error": "Email already registered"})));

        assert_eq!(h.manager.sign_up("n@x.com", "pw", signup_data(None)).await, Ok(()));
        assert_eq!(h.manager.session().user(), None);
        assert!(h.storage.is_empty());

        let err = h
            .manager
            .sign_up("n@x.com", "pw", signup_data(Some(Role::Admin)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Email already registered");
        assert_eq!(h.manager.session().user(), None);

        let sent = h.transport.requests();
        match (&sent[0].body, &sent[1].body) {
            (crate::services::http::HttpBody::Json(first), crate::services::http::HttpBody::Json(second)) => {
                assert_eq!(first["role"], "employee");
                assert_eq!(second["role"], "admin");
            }
            other => panic!("unexpected bodies {:?}", other),
        }
    }

    #[tokio::test]
    async fn sign_up_keeps_existing_session() {
        let h = harness();
        h.transport.push(login_ok("tok123", "admin"));
        h.transport.push(json_response(500, json!({})));
        h.manager.sign_in("a@b.com", "secret").await.unwrap();

        let err = h.manager.sign_up("n@x.com", "pw", signup_data(None)).await.unwrap_err();

        assert_eq!(err.to_string(), "Signup failed");
        assert!(h.manager.is_admin());
        assert_eq!(h.storage.get(STORAGE_KEY_AUTH_TOKEN).as_deref(), Some("tok123"));
    }

    #[tokio::test]
    async fn late_login_after_sign_out_is_discarded() {
        let h = harness();
        let gate = h.transport.push_gated(login_ok("tok-slow", "admin"));

        let (result, ()) = tokio::join!(h.manager.sign_in("a@b.com", "secret"), async {
            tokio::task::yield_now().await;
            h.manager.sign_out();
            gate.send(()).unwrap();
        });

        assert_eq!(result, Err(AuthError::Superseded));
        assert_eq!(h.manager.session().user(), None);
        assert!(h.storage.is_empty());
    }

    #[tokio::test]
    async fn overlapping_sign_ins_keep_the_latest_attempt() {
        let h = harness();
        let gate = h.transport.push_gated(login_ok("tok-first", "admin"));
        h.transport.push(login_ok("tok-second", "employee"));

        let (first, second) = tokio::join!(h.manager.sign_in("a@b.com", "secret"), async {
            tokio::task::yield_now().await;
            let result = h.manager.sign_in("a@b.com", "secret").await;
            gate.send(()).unwrap();
            result
        });

        assert_eq!(second, Ok(()));
        assert_eq!(first, Err(AuthError::Superseded));
        assert!(!h.manager.is_admin());
        assert_eq!(h.storage.get(STORAGE_KEY_AUTH_TOKEN).as_deref(), Some("tok-second"));
    }

    #[tokio::test]
    async fn subscribers_see_one_update_per_sign_in() {
        let h = harness();
        h.transport.push(login_ok("tok123", "employee"));
        let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = seen.clone();
        h.manager
            .session()
            .subscribe(move |s| sink.borrow_mut().push(s.is_authenticated()));

        h.manager.sign_in("a@b.com", "secret").await.unwrap();
        h.manager.sign_out();

        assert_eq!(*seen.borrow(), vec![true, false]);
    }
}
