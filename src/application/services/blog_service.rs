//! Blog management and statistics service.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::domain::entities::{Blog, BlogPatch, MAX_LIKES, NewBlog};
use crate::domain::list_helper::{
    self, AuthorBlogCount, AuthorLikes, FavouriteBlog, ListHelperError,
};
use crate::domain::repositories::BlogRepository;
use crate::error::AppError;

/// Aggregated like and authorship statistics over every stored blog.
///
/// Leader fields are `None` when there are no blogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogStats {
    pub blog_count: usize,
    pub total_likes: i64,
    pub favourite: Option<FavouriteBlog>,
    pub most_blogs: Option<AuthorBlogCount>,
    pub most_likes: Option<AuthorLikes>,
}

impl BlogStats {
    /// Runs every list helper over `blogs`.
    ///
    /// # Errors
    ///
    /// Returns [`ListHelperError::LikesOverflow`] if a like sum does not fit
    /// in an `i64`.
    pub fn from_blogs(blogs: &[Blog]) -> Result<Self, ListHelperError> {
        Ok(Self {
            blog_count: blogs.len(),
            total_likes: list_helper::total_likes(blogs)?,
            favourite: optional(list_helper::favourite_blog(blogs))?,
            most_blogs: optional(list_helper::most_blogs(blogs))?,
            most_likes: optional(list_helper::most_likes(blogs))?,
        })
    }
}

/// An empty collection has no leader; any other helper error is kept.
fn optional<T>(result: Result<T, ListHelperError>) -> Result<Option<T>, ListHelperError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ListHelperError::EmptyCollection) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Service for blog CRUD and statistics.
///
/// Ownership rules live here: only the user who created a blog may delete it.
pub struct BlogService {
    repository: Arc<dyn BlogRepository>,
}

impl BlogService {
    /// Creates a new blog service.
    pub fn new(repository: Arc<dyn BlogRepository>) -> Self {
        Self { repository }
    }

    /// Lists every blog with its owner populated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list(&self) -> Result<Vec<Blog>, AppError> {
        self.repository.list().await
    }

    /// Retrieves a single blog.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no blog has this ID.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get(&self, id: i64) -> Result<Blog, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Blog not found", json!({ "id": id })))
    }

    /// Creates a blog.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `title` or `url` is blank or `likes` is negative.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create(&self, new_blog: NewBlog) -> Result<Blog, AppError> {
        validate_fields(
            Some(new_blog.title.as_str()),
            Some(new_blog.url.as_str()),
            Some(new_blog.likes),
        )?;

        let blog = self.repository.create(new_blog).await?;
        tracing::info!(blog_id = blog.id, title = %blog.title, "Blog created");

        Ok(blog)
    }

    /// Partially updates a blog. Absent fields keep their stored values.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a provided `title` or `url` is blank or `likes` is negative.
    /// Returns [`AppError::NotFound`] if no blog has this ID.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update(&self, id: i64, patch: BlogPatch) -> Result<Blog, AppError> {
        validate_fields(patch.title.as_deref(), patch.url.as_deref(), patch.likes)?;

        self.repository
            .update(id, patch)
            .await?
            .ok_or_else(|| AppError::not_found("Blog not found", json!({ "id": id })))
    }

    /// Deletes a blog on behalf of `requester_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no blog has this ID.
    /// Returns [`AppError::Forbidden`] if the requester does not own the blog.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete(&self, id: i64, requester_id: i64) -> Result<(), AppError> {
        let blog = self.get(id).await?;

        if !blog.is_owned_by(requester_id) {
            tracing::warn!(blog_id = id, requester_id, "Refused to delete blog of another user");
            return Err(AppError::forbidden(
                "Only the creator can delete a blog",
                json!({ "id": id }),
            ));
        }

        if !self.repository.delete(id).await? {
            return Err(AppError::not_found("Blog not found", json!({ "id": id })));
        }

        tracing::info!(blog_id = id, "Blog deleted");
        Ok(())
    }

    /// Computes like and authorship statistics over all blogs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors or when a like sum
    /// overflows.
    pub async fn stats(&self) -> Result<BlogStats, AppError> {
        let blogs = self.repository.list().await?;
        Ok(BlogStats::from_blogs(&blogs)?)
    }
}

/// Checks the provided fields; `None` means the field is not being set.
fn validate_fields(
    title: Option<&str>,
    url: Option<&str>,
    likes: Option<i64>,
) -> Result<(), AppError> {
    let blank = |value: Option<&str>| value.is_some_and(|v| v.trim().is_empty());

    let mut missing = Vec::new();
    if blank(title) {
        missing.push("title");
    }
    if blank(url) {
        missing.push("url");
    }
    if !missing.is_empty() {
        return Err(AppError::bad_request(
            "title and url are required",
            json!({ "missing": missing }),
        ));
    }

    if let Some(likes) = likes
        && likes < 0
    {
        return Err(AppError::bad_request(
            "likes must not be negative",
            json!({ "likes": likes }),
        ));
    }

    if let Some(likes) = likes
        && likes > MAX_LIKES
    {
        return Err(AppError::bad_request(
            format!("likes must not exceed {MAX_LIKES}"),
            json!({ "likes": likes, "max": MAX_LIKES }),
        ));
    }

    Ok(())
}
