//! DTOs for user endpoints.

use serde::{Deserialize, Serialize};

use crate::application::services::UserWithBlogs;
use crate::domain::entities::{Blog, User};

/// Request body for `POST /api/users`.
///
/// Missing fields deserialize to empty strings so that length checks in the
/// service report them with the same message as short values.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: String,
    pub name: Option<String>,
    #[serde(default)]
    pub password: String,
}

/// Blog summary embedded in a user.
#[derive(Debug, Serialize)]
pub struct UserBlog {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
}

impl From<Blog> for UserBlog {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
        }
    }
}

/// JSON representation of a user. The password hash is never included.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<UserBlog>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            blogs: Vec::new(),
        }
    }
}

impl From<UserWithBlogs> for UserResponse {
    fn from(entry: UserWithBlogs) -> Self {
        Self {
            blogs: entry.blogs.into_iter().map(UserBlog::from).collect(),
            ..UserResponse::from(entry.user)
        }
    }
}
