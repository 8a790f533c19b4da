//! User entity model and DTOs.

use civica_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: Uuid,
    pub username: String,
    pub names: String,
    pub surnames: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub username: String,
    pub names: String,
    pub surnames: String,
    pub email: String,
    /// Resolved role names (e.g. `["user"]`).
    pub roles: Vec<String>,
    pub created_at: Timestamp,
}

impl UserResponse {
    /// Build the external representation from a row plus its resolved roles.
    pub fn from_user(user: User, roles: Vec<String>) -> Self {
        UserResponse {
            user_id: user.user_id,
            username: user.username,
            names: user.names,
            surnames: user.surnames,
            email: user.email,
            roles,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub names: String,
    pub surnames: String,
    pub email: String,
    pub password_hash: String,
}
