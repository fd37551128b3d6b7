//! Session state for the logged-in user
//!
//! "Logging in" only records a display name; there is no authentication.

use serde::Serialize;
use tracing::{debug, info};

/// Serializable view of the session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub display_name: Option<String>,
    pub is_logged_in: bool,
}

/// Holds the display name and login flag, always set together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    display_name: Option<String>,
}

impl Session {
    /// A logged-out session
    pub fn new() -> Self {
        Self::default()
    }

    /// Log in as `name` (trimmed); blank names leave the session unchanged
    pub fn login(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            debug!("Ignoring login with a blank name");
            return false;
        }
        info!(user = name, "Logged in");
        self.display_name = Some(name.to_string());
        true
    }

    pub fn logout(&mut self) {
        if let Some(name) = self.display_name.take() {
            info!(user = %name, "Logged out");
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.display_name.is_some()
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            display_name: self.display_name.clone(),
            is_logged_in: self.is_logged_in(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_logged_out() {
        let session = Session::new();
        assert!(!session.is_logged_in());
        assert_eq!(session.state(), SessionState::default());
    }

    #[test]
    fn login_then_logout() {
        let mut session = Session::new();
        assert!(session.login("Alice"));
        assert!(session.is_logged_in());
        assert_eq!(session.display_name(), Some("Alice"));

        session.logout();
        assert_eq!(session.state(), SessionState::default());
    }

    #[test]
    fn login_trims_and_rejects_blank() {
        let mut session = Session::new();
        assert!(!session.login("   "));
        assert!(!session.is_logged_in());

        assert!(session.login("  Bob "));
        assert_eq!(session.display_name(), Some("Bob"));
    }

    #[test]
    fn state_serializes_camel_case() {
        let mut session = Session::new();
        session.login("Alice");
        let json = serde_json::to_value(session.state()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"displayName": "Alice", "isLoggedIn": true})
        );
    }
}
