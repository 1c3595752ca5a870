//! User domain types.

use serde::{Deserialize, Serialize};

use super::email::Email;

/// A registered user.
///
/// Usernames are unique byte-exact; emails are unique case-insensitively.
///
/// The password is stored in plaintext because that is the shape of the
/// persisted user record this engine is consistent with. It is a known
/// weakness of the data format, not a recommendation; the record should be
/// treated as sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique username.
    pub username: String,
    /// Email address, unique case-insensitively.
    pub email: Email,
    /// Plaintext password (see type docs).
    pub password: String,
    /// Whether this user is the distinguished admin.
    pub is_admin: bool,
}

/// Registration input for a new (non-admin) user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Requested username.
    pub username: String,
    /// Email address.
    pub email: Email,
    /// Plaintext password.
    pub password: String,
}

impl NewUser {
    /// Build the stored [`User`] record. Registration never grants admin.
    #[must_use]
    pub fn into_user(self) -> User {
        User {
            username: self.username,
            email: self.email,
            password: self.password,
            is_admin: false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_never_grants_admin() {
        let new = NewUser {
            username: "ana".to_string(),
            email: Email::parse("ana@example.com").unwrap(),
            password: "hunter2".to_string(),
        };
        assert!(!new.into_user().is_admin);
    }

    #[test]
    fn test_serde_field_names() {
        let user = User {
            username: "ana".to_string(),
            email: Email::parse("ana@example.com").unwrap(),
            password: "hunter2".to_string(),
            is_admin: true,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["isAdmin"], true);
        assert_eq!(json["email"], "ana@example.com");
    }
}
