//! User account model.

use chrono::{DateTime, Utc};

use solestack_core::{Email, UserId, UserProfile, UserRole};

/// A user account, including the password hash.
///
/// Not `Serialize`: anything leaving the service goes through
/// [`UserProfile`], which has no hash field to leak.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login email, unique across the table.
    pub email: Email,
    /// Bcrypt hash of the password.
    pub password_hash: String,
    /// Account role.
    pub role: UserRole,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a new account with a fresh ID and current timestamps.
    #[must_use]
    pub fn new(email: Email, password_hash: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::generate(),
            email,
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// The password-free view of this account.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            email: self.email.clone(),
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(
            Email::parse("user@example.com").unwrap(),
            "$2b$10$hash".to_owned(),
            UserRole::User,
        );
        assert_eq!(user.created_at, user.updated_at);
        assert!(!user.id.as_str().is_empty());
    }

    #[test]
    fn test_profile_has_no_hash() {
        let user = User::new(
            Email::parse("user@example.com").unwrap(),
            "$2b$10$hash".to_owned(),
            UserRole::Admin,
        );
        let profile = user.profile();
        assert_eq!(profile.id, user.id);
        assert_eq!(profile.role, UserRole::Admin);

        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
    }
}
