//! Authentication service for logins and bearer session tokens.

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::error::AppError;
use crate::utils::password::verify_password;
use crate::utils::token::{generate_token, hash_token};
use serde_json::json;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Raw bearer token. Shown to the client once and never stored.
    pub token: String,
    pub user: User,
}

/// Service for logging users in and authenticating bearer tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    signing_secret: String,
    session_ttl: Duration,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `users` - user repository for credential lookups
    /// - `sessions` - session repository for token storage
    /// - `signing_secret` - HMAC key for token hashes
    /// - `session_ttl` - lifetime of newly issued sessions
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        signing_secret: String,
        session_ttl: Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            signing_secret,
            session_ttl,
        }
    }

    /// Checks credentials and opens a new session.
    ///
    /// The username is trimmed as it is on registration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the username is unknown or the
    /// password does not match.
    /// Returns [`AppError::Internal`] on hashing, RNG or database errors.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let username = username.trim();
        let Some(user) = self.users.find_by_username(username).await? else {
            tracing::debug!(username, "Login for unknown user");
            return Err(invalid_credentials());
        };

        let password = password.to_string();
        let stored_hash = user.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
                .await
                .map_err(|e| {
                    AppError::internal(
                        "Password verification task failed",
                        json!({ "reason": e.to_string() }),
                    )
                })?
                .map_err(|e| {
                    tracing::error!(user_id = user.id, error = %e, "Stored password hash is unusable");
                    AppError::internal("Password verification failed", json!({}))
                })?;

        if !matches {
            tracing::debug!(user_id = user.id, "Login with wrong password");
            return Err(invalid_credentials());
        }

        let token = generate_token().map_err(|e| {
            AppError::internal("Failed to generate token", json!({ "reason": e.to_string() }))
        })?;
        let token_hash = hash_token(&self.signing_secret, &token);
        let expires_at = Utc::now() + self.session_ttl;

        self.sessions
            .create(user.id, &token_hash, expires_at)
            .await?;

        tracing::info!(user_id = user.id, %expires_at, "Session opened");
        Ok(LoginOutcome { token, user })
    }

    /// Resolves a raw bearer token to its user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown, expired,
    /// revoked, or its user no longer exists.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let token_hash = hash_token(&self.signing_secret, token);

        let user_id = self
            .sessions
            .find_active_user(&token_hash)
            .await?
            .ok_or_else(invalid_token)?;

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(invalid_token)
    }

    /// Revokes the session behind a raw bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        let token_hash = hash_token(&self.signing_secret, token);

        if self.sessions.revoke(&token_hash).await? {
            tracing::info!("Session revoked");
        }

        Ok(())
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("invalid username or password", json!({}))
}

fn invalid_token() -> AppError {
    AppError::unauthorized(
        "Unauthorized",
        json!({ "reason": "Invalid, expired or revoked token" }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Session;
    use crate::domain::repositories::{MockSessionRepository, MockUserRepository};
    use crate::utils::password::hash_password;

    const SECRET: &str = "test-signing-secret";

    fn create_test_user(password: &str) -> User {
        User {
            id: 5,
            username: "root".to_string(),
            name: Some("Superuser".to_string()),
            password_hash: hash_password(password, 1_000).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn service(users: MockUserRepository, sessions: MockSessionRepository) -> AuthService {
        AuthService::new(
            Arc::new(users),
            Arc::new(sessions),
            SECRET.to_string(),
            Duration::hours(1),
        )
    }

    #[tokio::test]
    async fn test_login_success_stores_token_hash() {
        let user = create_test_user("sekret");
        let mut mock_users = MockUserRepository::new();
        mock_users
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let mut mock_sessions = MockSessionRepository::new();
        mock_sessions
            .expect_create()
            .withf(|user_id, token_hash, expires_at| {
                *user_id == 5 && token_hash.len() == 64 && *expires_at > Utc::now()
            })
            .times(1)
            .returning(|user_id, token_hash, expires_at| {
                Ok(Session {
                    id: 1,
                    user_id,
                    token_hash: token_hash.to_string(),
                    created_at: Utc::now(),
                    expires_at,
                    revoked_at: None,
                })
            });

        let outcome = service(mock_users, mock_sessions)
            .login("root", "sekret")
            .await
            .unwrap();

        assert_eq!(outcome.user.username, "root");
        assert_eq!(outcome.token.len(), 43);
    }

    #[tokio::test]
    async fn test_login_trims_username() {
        let user = create_test_user("sekret");
        let mut mock_users = MockUserRepository::new();
        mock_users
            .expect_find_by_username()
            .withf(|username| username == "root")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let mut mock_sessions = MockSessionRepository::new();
        mock_sessions
            .expect_create()
            .times(1)
            .returning(|user_id, token_hash, expires_at| {
                Ok(Session {
                    id: 1,
                    user_id,
                    token_hash: token_hash.to_string(),
                    created_at: Utc::now(),
                    expires_at,
                    revoked_at: None,
                })
            });

        let outcome = service(mock_users, mock_sessions)
            .login("  root ", "sekret")
            .await
            .unwrap();

        assert_eq!(outcome.user.username, "root");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let user = create_test_user("sekret");
        let mut mock_users = MockUserRepository::new();
        mock_users
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let mut mock_sessions = MockSessionRepository::new();
        mock_sessions.expect_create().times(0);

        let result = service(mock_users, mock_sessions)
            .login("root", "wrong")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let mut mock_users = MockUserRepository::new();
        mock_users
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(mock_users, MockSessionRepository::new())
            .login("nobody", "sekret")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let expected_hash = hash_token(SECRET, "valid-token");
        let mut mock_sessions = MockSessionRepository::new();
        mock_sessions
            .expect_find_active_user()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(|_| Ok(Some(5)));

        let user = create_test_user("sekret");
        let mut mock_users = MockUserRepository::new();
        mock_users
            .expect_find_by_id()
            .withf(|id| *id == 5)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let user = service(mock_users, mock_sessions)
            .authenticate("valid-token")
            .await
            .unwrap();

        assert_eq!(user.id, 5);
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut mock_sessions = MockSessionRepository::new();
        mock_sessions
            .expect_find_active_user()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(MockUserRepository::new(), mock_sessions)
            .authenticate("invalid-token")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_deleted_user() {
        let mut mock_sessions = MockSessionRepository::new();
        mock_sessions
            .expect_find_active_user()
            .times(1)
            .returning(|_| Ok(Some(5)));

        let mut mock_users = MockUserRepository::new();
        mock_users
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(mock_users, mock_sessions)
            .authenticate("orphaned-token")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_logout_revokes_hash() {
        let expected_hash = hash_token(SECRET, "some-token");
        let mut mock_sessions = MockSessionRepository::new();
        mock_sessions
            .expect_revoke()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(|_| Ok(true));

        let result = service(MockUserRepository::new(), mock_sessions)
            .logout("some-token")
            .await;

        assert!(result.is_ok());
    }
}
