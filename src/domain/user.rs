//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_INSTRUCTOR, ROLE_LEARNER, ROUTE_CHAT, ROUTE_DASHBOARD};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Instructor,
    Learner,
}

impl UserRole {
    /// Check if this role has instructor privileges
    pub fn is_instructor(&self) -> bool {
        matches!(self, UserRole::Instructor)
    }

    /// The page a session of this role lands on after a denied navigation
    pub fn home_route(&self) -> &'static str {
        match self {
            UserRole::Instructor => ROUTE_DASHBOARD,
            UserRole::Learner => ROUTE_CHAT,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Instructor => write!(f, "{}", ROLE_INSTRUCTOR),
            UserRole::Learner => write!(f, "{}", ROLE_LEARNER),
        }
    }
}

/// User record as persisted by the credential store.
///
/// The serialized form is the on-disk schema of the credential file,
/// hence camelCase field names and no password redaction here; the
/// hash never crosses the store boundary outward (see [`Identity`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id and creation timestamp
    pub fn new(new_user: NewUser) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            user_type: new_user.user_type,
            created_at: Utc::now(),
        }
    }
}

/// User creation data, password already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: UserRole,
}

/// The non-secret subset of a user record (safe to return to clients).
///
/// This is the only representation exposed past the credential store
/// boundary; it never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Given name
    #[schema(example = "John")]
    pub first_name: String,
    /// Family name
    #[schema(example = "Doe")]
    pub last_name: String,
    /// User role
    #[schema(example = "learner")]
    pub user_type: UserRole,
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            user_type: user.user_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_new_user() -> NewUser {
        NewUser {
            email: "test@example.com".to_string(),
            password_hash: "hashed".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            user_type: UserRole::Learner,
        }
    }

    #[test]
    fn test_new_user_gets_fresh_id() {
        let a = User::new(sample_new_user());
        let b = User::new(sample_new_user());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_identity_never_carries_the_hash() {
        let identity = Identity::from(User::new(sample_new_user()));
        let json = serde_json::to_value(&identity).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["email"], "test@example.com");
        assert_eq!(json["userType"], "learner");
        assert_eq!(json["firstName"], "Test");
    }

    #[test]
    fn test_role_home_routes() {
        assert_eq!(UserRole::Instructor.home_route(), "/dashboard");
        assert_eq!(UserRole::Learner.home_route(), "/chat");
    }

    #[test]
    fn test_role_display() {
        assert_eq!(UserRole::Instructor.to_string(), "instructor");
        assert_eq!(UserRole::Learner.to_string(), "learner");
    }

    #[test]
    fn test_persisted_user_uses_camel_case_schema() {
        let user = User::new(sample_new_user());
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("password_hash").is_none());
    }
}
