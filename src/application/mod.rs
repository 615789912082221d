//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::blog_service::BlogService`] - Blog CRUD, ownership and statistics
//! - [`services::user_service::UserService`] - Registration and user listing
//! - [`services::auth_service::AuthService`] - Login and bearer token authentication

pub mod services;
