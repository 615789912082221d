//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without persistence concerns.
//!
//! # Entity Types
//!
//! - [`Blog`] - A blog post with its like count and owner
//! - [`User`] - A registered account owning blogs
//! - [`Session`] - A login session backed by a bearer token
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! - `NewBlog`, `NewUser` - For creating new records
//! - `BlogPatch` - For partial updates

pub mod blog;
pub mod session;
pub mod user;

pub use blog::{Blog, BlogOwner, BlogPatch, MAX_LIKES, NewBlog};
pub use session::Session;
pub use user::{NewUser, User};
