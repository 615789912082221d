//! User entity.

use chrono::{DateTime, Utc};

/// A registered user.
///
/// `password_hash` holds the encoded PBKDF2 hash produced by
/// [`crate::utils::password::hash_password`] and must never leave the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
}
