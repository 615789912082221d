//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with bound
//! parameters and `FromRow` row mapping.
//!
//! # Repositories
//!
//! - [`PgBlogRepository`] - Blog storage with owner joins
//! - [`PgUserRepository`] - User accounts
//! - [`PgSessionRepository`] - Login session tokens

pub mod pg_blog_repository;
pub mod pg_session_repository;
pub mod pg_user_repository;

pub use pg_blog_repository::PgBlogRepository;
pub use pg_session_repository::PgSessionRepository;
pub use pg_user_repository::PgUserRepository;
