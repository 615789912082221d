//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod blogs;
pub mod health;
pub mod login;
pub mod users;

pub use blogs::{
    blog_stats_handler, create_blog_handler, delete_blog_handler, get_blog_handler,
    list_blogs_handler, update_blog_handler,
};
pub use health::health_handler;
pub use login::{login_handler, logout_handler};
pub use users::{create_user_handler, list_users_handler};
