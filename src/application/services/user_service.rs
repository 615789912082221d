//! User registration and listing service.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Blog, NewUser, User};
use crate::domain::repositories::{BlogRepository, UserRepository};
use crate::error::AppError;
use crate::utils::password::hash_password;

/// Minimum length for usernames and passwords.
pub const MIN_CREDENTIAL_LEN: usize = 3;

/// A user together with the blogs they own.
#[derive(Debug, Clone)]
pub struct UserWithBlogs {
    pub user: User,
    pub blogs: Vec<Blog>,
}

/// Service for registering and listing users.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    blogs: Arc<dyn BlogRepository>,
    hash_rounds: u32,
}

impl UserService {
    /// Creates a new user service.
    ///
    /// `hash_rounds` is the PBKDF2 iteration count used for new passwords.
    pub fn new(
        users: Arc<dyn UserRepository>,
        blogs: Arc<dyn BlogRepository>,
        hash_rounds: u32,
    ) -> Self {
        Self {
            users,
            blogs,
            hash_rounds,
        }
    }

    /// Registers a new user.
    ///
    /// The password is hashed on a blocking thread so that key stretching does
    /// not stall the async runtime.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the username or password is shorter
    /// than [`MIN_CREDENTIAL_LEN`] characters.
    /// Returns [`AppError::Conflict`] if the username is taken.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn register(
        &self,
        username: String,
        name: Option<String>,
        password: String,
    ) -> Result<User, AppError> {
        let username = username.trim().to_string();

        if username.chars().count() < MIN_CREDENTIAL_LEN
            || password.chars().count() < MIN_CREDENTIAL_LEN
        {
            return Err(AppError::bad_request(
                "username and password must be present and at least 3 characters long",
                json!({ "min_length": MIN_CREDENTIAL_LEN }),
            ));
        }

        if self.users.find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict(
                "username must be unique",
                json!({ "username": username }),
            ));
        }

        let rounds = self.hash_rounds;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, rounds))
            .await
            .map_err(|e| {
                AppError::internal(
                    "Password hashing task failed",
                    json!({ "reason": e.to_string() }),
                )
            })?
            .map_err(|e| {
                AppError::internal("Password hashing failed", json!({ "reason": e.to_string() }))
            })?;

        let user = self
            .users
            .create(NewUser {
                username,
                name: name.filter(|n| !n.trim().is_empty()),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Counts registered users. Doubles as a database liveness probe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_users(&self) -> Result<i64, AppError> {
        self.users.count().await
    }

    /// Lists every user with their blogs populated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_users(&self) -> Result<Vec<UserWithBlogs>, AppError> {
        let users = self.users.list().await?;
        let blogs = self.blogs.list().await?;

        let mut by_owner: HashMap<i64, Vec<Blog>> = HashMap::new();
        for blog in blogs {
            if let Some(owner) = &blog.user {
                by_owner.entry(owner.id).or_default().push(blog);
            }
        }

        Ok(users
            .into_iter()
            .map(|user| UserWithBlogs {
                blogs: by_owner.remove(&user.id).unwrap_or_default(),
                user,
            })
            .collect())
    }
}
