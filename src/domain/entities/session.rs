//! Login session entity.

use chrono::{DateTime, Utc};

/// A login session.
///
/// Only the HMAC of the bearer token is stored; the raw token is handed to
/// the client once at login.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Returns true if the session can still authenticate requests.
    pub fn is_active(&self) -> bool {
        self.revoked_at.is_none() && Utc::now() < self.expires_at
    }
}
