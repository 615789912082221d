//! Repository trait for login sessions.

use crate::domain::entities::Session;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for login sessions.
///
/// Sessions are keyed by the HMAC of the bearer token. Raw tokens never reach
/// this layer.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores a new session for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the token hash already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(
        &self,
        user_id: i64,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, AppError>;

    /// Resolves a token hash to the user ID of an active session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(user_id))` if the session exists, is not revoked and has not expired
    /// - `Ok(None)` otherwise
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_active_user(&self, token_hash: &str) -> Result<Option<i64>, AppError>;

    /// Revokes the session with the given token hash.
    ///
    /// Returns `Ok(false)` if no active session matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn revoke(&self, token_hash: &str) -> Result<bool, AppError>;

    /// Deletes expired and revoked sessions, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn purge_expired(&self) -> Result<u64, AppError>;
}
