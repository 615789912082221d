//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, BlogService, UserService};

/// Services shared across request handlers.
///
/// Cheap to clone: every field is an [`Arc`].
#[derive(Clone)]
pub struct AppState {
    pub blog_service: Arc<BlogService>,
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Creates application state from the three services.
    pub fn new(
        blog_service: Arc<BlogService>,
        user_service: Arc<UserService>,
        auth_service: Arc<AuthService>,
    ) -> Self {
        Self {
            blog_service,
            user_service,
            auth_service,
        }
    }
}
