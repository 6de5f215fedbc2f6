//! Password-free user profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Email, UserId, UserRole};

/// A user as every service outside auth is allowed to see one.
///
/// This is the body of auth's `GET /api/auth/me` and the identity attached to
/// authenticated requests. The password hash cannot appear here by
/// construction; only the auth service's internal user type carries it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique user ID.
    pub id: UserId,
    /// Login email.
    pub email: Email,
    /// Account role.
    pub role: UserRole,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_form_is_camel_case() {
        let profile = UserProfile {
            id: UserId::new("u-1"),
            email: Email::parse("user@example.com").unwrap(),
            role: UserRole::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["role"], "USER");
        assert!(json.get("password").is_none());
    }
}
