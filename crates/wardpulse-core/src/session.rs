//! Session gate: single source of truth for authentication status.
//!
//! Every transition into [`SessionStatus`] goes through [`SessionGate`]
//! methods. The gate fails closed: an indeterminate check result always
//! lands on `Unauthenticated`, never `Authenticated`.

use serde::{Deserialize, Serialize};

/// Authentication status as known by the client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// No status check has run yet.
    #[default]
    Unknown,
    /// The startup status check is in flight.
    Checking,
    /// The backend confirmed a live session.
    Authenticated,
    /// No session, a failed check, or a mid-session expiry.
    Unauthenticated,
}

/// Owns [`SessionStatus`] for the lifetime of the application.
#[derive(Clone, Debug, Default)]
pub struct SessionGate {
    status: SessionStatus,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    /// True until the startup check has resolved one way or the other.
    pub fn is_resolving(&self) -> bool {
        matches!(self.status, SessionStatus::Unknown | SessionStatus::Checking)
    }

    /// Enter the visible "authenticating" state before the status call.
    pub fn begin_check(&mut self) {
        self.status = SessionStatus::Checking;
    }

    /// Apply the backend's `logged_in` flag.
    pub fn resolve_check(&mut self, logged_in: bool) {
        self.status = if logged_in {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        };
    }

    /// The status call itself failed; fail closed.
    pub fn fail_check(&mut self) {
        self.status = SessionStatus::Unauthenticated;
    }

    /// The login collaborator reported accepted credentials.
    pub fn mark_authenticated(&mut self) {
        self.status = SessionStatus::Authenticated;
    }

    /// A protected call reported an authorization denial, or the user
    /// logged out.
    pub fn mark_unauthenticated(&mut self) {
        self.status = SessionStatus::Unauthenticated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unknown_and_resolving() {
        let gate = SessionGate::new();
        assert_eq!(gate.status(), SessionStatus::Unknown);
        assert!(gate.is_resolving());
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_check_transitions_through_checking() {
        let mut gate = SessionGate::new();
        gate.begin_check();
        assert_eq!(gate.status(), SessionStatus::Checking);
        assert!(gate.is_resolving());

        gate.resolve_check(true);
        assert_eq!(gate.status(), SessionStatus::Authenticated);
        assert!(!gate.is_resolving());
    }

    #[test]
    fn test_negative_flag_resolves_unauthenticated() {
        let mut gate = SessionGate::new();
        gate.begin_check();
        gate.resolve_check(false);
        assert_eq!(gate.status(), SessionStatus::Unauthenticated);
    }

    #[test]
    fn test_failed_check_fails_closed() {
        let mut gate = SessionGate::new();
        gate.begin_check();
        gate.fail_check();
        assert_eq!(gate.status(), SessionStatus::Unauthenticated);
    }

    #[test]
    fn test_login_success_authenticates() {
        let mut gate = SessionGate::new();
        gate.begin_check();
        gate.resolve_check(false);
        gate.mark_authenticated();
        assert!(gate.is_authenticated());
    }

    #[test]
    fn test_expiry_signal_revokes_authentication() {
        let mut gate = SessionGate::new();
        gate.mark_authenticated();
        gate.mark_unauthenticated();
        assert_eq!(gate.status(), SessionStatus::Unauthenticated);
    }
}
