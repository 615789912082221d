//! Repository trait for blog data access.

use crate::domain::entities::{Blog, BlogPatch, NewBlog};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing blogs.
///
/// Blogs are always returned with their owner populated when one exists.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBlogRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_blog.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Creates a new blog.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_blog: NewBlog) -> Result<Blog, AppError>;

    /// Lists every blog in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<Blog>, AppError>;

    /// Finds a blog by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Blog))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Blog>, AppError>;

    /// Partially updates a blog.
    ///
    /// Only fields present in [`BlogPatch`] are modified. Returns `Ok(None)` if no blog has the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, patch: BlogPatch) -> Result<Option<Blog>, AppError>;

    /// Deletes a blog.
    ///
    /// Returns `Ok(true)` if a blog was removed, `Ok(false)` if none matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
