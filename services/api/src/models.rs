//! API models for request and response payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod exam;

/// Role given to the seeded administrator account
pub const ADMIN_ROLE: &str = "ADMIN";

/// Role given to every other account
pub const USER_ROLE: &str = "USER";

/// User document as stored in the `users` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Stored and compared as plain text
    pub password: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// New user creation payload
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: String,
}

/// Public profile returned by `GET /auth/user`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub role: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

/// Response for a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub username: String,
}
