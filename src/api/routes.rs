//! API route configuration.
//!
//! Routes are split by the protection they need. The top-level router in
//! [`crate::routes`] attaches [`crate::api::middleware::auth`] to
//! [`protected_routes`] and rate limits each group.

use crate::api::handlers::{
    blog_stats_handler, create_blog_handler, create_user_handler, delete_blog_handler,
    get_blog_handler, list_blogs_handler, list_users_handler, login_handler, logout_handler,
    update_blog_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Read-only and unauthenticated blog routes.
///
/// # Endpoints
///
/// - `GET    /blogs`          - List blogs with owners
/// - `GET    /blogs/stats`    - Like and authorship statistics
/// - `GET    /blogs/{id}`     - Single blog
/// - `PUT    /blogs/{id}`     - Partially update a blog
/// - `GET    /users`          - List users with their blogs
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/blogs", get(list_blogs_handler))
        .route("/blogs/stats", get(blog_stats_handler))
        .route(
            "/blogs/{id}",
            get(get_blog_handler).put(update_blog_handler),
        )
        .route("/users", get(list_users_handler))
}

/// Routes that accept credentials.
///
/// # Endpoints
///
/// - `POST   /login`          - Exchange username and password for a token
/// - `POST   /users`          - Register a user
pub fn credential_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_handler))
        .route("/users", post(create_user_handler))
}

/// Routes that require a Bearer session token.
///
/// # Endpoints
///
/// - `POST   /blogs`          - Create a blog owned by the caller
/// - `DELETE /blogs/{id}`     - Delete a blog the caller created
/// - `POST   /logout`         - Revoke the caller's session
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/blogs", post(create_blog_handler))
        .route("/blogs/{id}", delete(delete_blog_handler))
        .route("/logout", post(logout_handler))
}
