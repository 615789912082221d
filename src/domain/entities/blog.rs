//! Blog entity and its creation/update inputs.

use serde::Serialize;

/// The user a blog belongs to, as shown alongside the blog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogOwner {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
}

/// Upper bound accepted for a blog's like count.
pub const MAX_LIKES: i64 = 1_000_000_000;

/// A stored blog post.
///
/// `user` is `None` for blogs whose owner was removed or that were imported
/// without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub user: Option<BlogOwner>,
}

impl Blog {
    /// Returns true if `user_id` owns this blog.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user.as_ref().is_some_and(|owner| owner.id == user_id)
    }
}

/// Input data for creating a new blog.
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub user_id: Option<i64>,
}

/// Partial update for an existing blog.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}
