//! DTOs for blog endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Blog, BlogOwner, BlogPatch, NewBlog};

/// Request body for `POST /api/blogs`.
///
/// `title` and `url` are required. `author` defaults to an empty string and
/// `likes` to `0`. Unknown fields are ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBlogRequest {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title must not be empty")
    )]
    pub title: Option<String>,

    #[serde(default)]
    pub author: String,

    #[validate(
        required(message = "url is required"),
        length(min = 1, message = "url must not be empty")
    )]
    pub url: Option<String>,

    #[validate(range(
        min = 0,
        max = 1_000_000_000,
        message = "likes must be between 0 and 1000000000"
    ))]
    pub likes: Option<i64>,
}

impl CreateBlogRequest {
    /// Converts the validated request into a [`NewBlog`] owned by `owner_id`.
    ///
    /// Call only after [`Validate::validate`] has succeeded.
    pub fn into_new_blog(self, owner_id: i64) -> NewBlog {
        NewBlog {
            title: self.title.unwrap_or_default(),
            author: self.author,
            url: self.url.unwrap_or_default(),
            likes: self.likes.unwrap_or(0),
            user_id: Some(owner_id),
        }
    }
}

/// Request body for `PUT /api/blogs/{id}`.
///
/// Every field is optional. Only provided fields are changed.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBlogRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,

    pub author: Option<String>,

    #[validate(length(min = 1, message = "url must not be empty"))]
    pub url: Option<String>,

    #[validate(range(
        min = 0,
        max = 1_000_000_000,
        message = "likes must be between 0 and 1000000000"
    ))]
    pub likes: Option<i64>,
}

impl From<UpdateBlogRequest> for BlogPatch {
    fn from(req: UpdateBlogRequest) -> Self {
        BlogPatch {
            title: req.title,
            author: req.author,
            url: req.url,
            likes: req.likes,
        }
    }
}

/// JSON representation of a blog.
#[derive(Debug, Serialize)]
pub struct BlogResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub user: Option<BlogOwner>,
}

impl From<Blog> for BlogResponse {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user: blog.user,
        }
    }
}
