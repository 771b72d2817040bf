//! Identity model - the active user's public profile data.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The logged-in user. Passwords are never part of it.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl Identity {
    /// Create an identity with a fresh unique ID.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.into(),
            email: email.into(),
        }
    }

    /// Create an identity whose username is the local part of the email.
    pub fn from_email(email: &str) -> Self {
        Self::new(username_from_email(email), email)
    }
}

/// Text before the first `@`, or the whole string when there is none.
pub fn username_from_email(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Loose `local@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_from_email() {
        assert_eq!(username_from_email("alice@example.com"), "alice");
        assert_eq!(username_from_email("bob"), "bob");
        assert_eq!(username_from_email("@example.com"), "");
    }

    #[test]
    fn test_from_email() {
        let identity = Identity::from_email("carol@maps.io");
        assert_eq!(identity.username, "carol");
        assert_eq!(identity.email, "carol@maps.io");
        assert!(!identity.id.is_empty());
    }

    #[test]
    fn test_new_assigns_unique_ids() {
        let a = Identity::new("alice", "alice@example.com");
        let b = Identity::new("alice", "alice@example.com");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.org"));
        assert!(!is_valid_email("alice"));
        assert!(!is_valid_email("alice@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("alice@example"));
        assert!(!is_valid_email("alice@@example.com"));
        assert!(!is_valid_email("al ice@example.com"));
    }
}
