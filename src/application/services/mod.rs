//! Business logic services for the application layer.

pub mod auth_service;
pub mod blog_service;
pub mod user_service;

pub use auth_service::{AuthService, LoginOutcome};
pub use blog_service::{BlogService, BlogStats};
pub use user_service::{UserService, UserWithBlogs};
