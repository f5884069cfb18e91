// ============================================================================
// SESSION STATE - who is logged in
// ============================================================================
// Written only by the SessionManager. Screens receive a SessionHandle, which
// can read and subscribe but not mutate.
// ============================================================================

use crate::models::User;
use crate::state::reactivity::{ReactiveState, SubscriptionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Bootstrapping,
    Unauthenticated,
    Authenticated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    /// True only until bootstrap finishes
    pub loading: bool,
}

impl Session {
    fn bootstrapping() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The only authorization gate for admin screens
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().map(User::is_admin).unwrap_or(false)
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.user, self.loading) {
            (Some(_), _) => SessionPhase::Authenticated,
            (None, true) => SessionPhase::Bootstrapping,
            (None, false) => SessionPhase::Unauthenticated,
        }
    }
}

/// Session container, created once at application start
#[derive(Clone)]
pub struct SessionState {
    inner: ReactiveState<Session>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            inner: ReactiveState::new(Session::bootstrapping()),
        }
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            inner: self.inner.clone(),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.inner.get()
    }

    pub(crate) fn set_user(&self, user: Option<User>) {
        self.inner.update(|session| session.user = user);
    }

    pub(crate) fn set_loading(&self, loading: bool) {
        self.inner.update(|session| session.loading = loading);
    }

    /// Leaves Bootstrapping for Unauthenticated in a single notification
    pub(crate) fn finish_bootstrap(&self) {
        self.inner.set(Session {
            user: None,
            loading: false,
        });
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of the session
#[derive(Clone)]
pub struct SessionHandle {
    inner: ReactiveState<Session>,
}

impl SessionHandle {
    pub fn snapshot(&self) -> Session {
        self.inner.get()
    }

    pub fn user(&self) -> Option<User> {
        self.inner.with(|s| s.user.clone())
    }

    pub fn is_admin(&self) -> bool {
        self.inner.with(Session::is_admin)
    }

    pub fn is_loading(&self) -> bool {
        self.inner.with(|s| s.loading)
    }

    pub fn phase(&self) -> SessionPhase {
        self.inner.with(Session::phase)
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Session) + 'static,
    {
        self.inner.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.unsubscribe(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn user(role: Role) -> User {
        User {
            id: "1".to_string(),
            email: "a@b.com".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            role,
        }
    }

    #[test]
    fn starts_bootstrapping() {
        let state = SessionState::new();
        assert_eq!(state.handle().phase(), SessionPhase::Bootstrapping);
        assert!(state.handle().is_loading());
        assert!(!state.handle().is_admin());
    }

    #[test]
    fn is_admin_follows_user_role() {
        let state = SessionState::new();
        let handle = state.handle();
        state.set_loading(false);
        assert!(!handle.is_admin());

        state.set_user(Some(user(Role::Employee)));
        assert!(!handle.is_admin());
        assert_eq!(handle.phase(), SessionPhase::Authenticated);

        state.set_user(Some(user(Role::Admin)));
        assert!(handle.is_admin());

        state.set_user(None);
        assert!(!handle.is_admin());
        assert_eq!(handle.phase(), SessionPhase::Unauthenticated);
    }

    #[test]
    fn handle_observes_changes() {
        let state = SessionState::new();
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = seen.clone();
        state.handle().subscribe(move |s| sink.borrow_mut().push(s.phase()));

        state.set_loading(false);
        state.set_user(Some(user(Role::Admin)));

        assert_eq!(
            *seen.borrow(),
            vec![SessionPhase::Unauthenticated, SessionPhase::Authenticated]
        );
    }
}
