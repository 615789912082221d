//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check with database probe (public)
//! - `/api/*`            - JSON API, see [`crate::api::routes`]
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, stricter on credential routes
//! - **Authentication** - Bearer session token on protected routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the API without rate limiting or tracing.
///
/// Rate limiting keys on the peer address, which only exists when the server
/// is started with connect info, so tests drive this router directly.
pub fn api_router(state: AppState) -> Router {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let api = Router::new()
        .merge(api::routes::public_routes())
        .merge(api::routes::credential_routes())
        .merge(protected);

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .with_state(state)
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(rate_limit::layer());

    let public = api::routes::public_routes().layer(rate_limit::layer());
    let credentials = api::routes::credential_routes().layer(rate_limit::secure_layer());

    let api = Router::new()
        .merge(public)
        .merge(credentials)
        .merge(protected);

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
