//! DTOs for session endpoints.

use serde::{Deserialize, Serialize};

use crate::application::services::LoginOutcome;

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Response for a successful login. `token` goes into `Authorization: Bearer`.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            token: outcome.token,
            username: outcome.user.username,
            name: outcome.user.name,
        }
    }
}
