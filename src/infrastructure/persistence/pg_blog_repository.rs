//! PostgreSQL implementation of blog repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Blog, BlogOwner, BlogPatch, NewBlog};
use crate::domain::repositories::BlogRepository;
use crate::error::AppError;

/// Blog row joined with its owner's public columns.
#[derive(sqlx::FromRow)]
struct BlogRow {
    id: i64,
    title: String,
    author: String,
    url: String,
    likes: i64,
    user_id: Option<i64>,
    username: Option<String>,
    name: Option<String>,
}

impl From<BlogRow> for Blog {
    fn from(row: BlogRow) -> Self {
        let user = match (row.user_id, row.username) {
            (Some(id), Some(username)) => Some(BlogOwner {
                id,
                username,
                name: row.name,
            }),
            _ => None,
        };

        Blog {
            id: row.id,
            title: row.title,
            author: row.author,
            url: row.url,
            likes: row.likes,
            user,
        }
    }
}

/// PostgreSQL repository for blogs.
///
/// Every read joins `users` so blogs come back with their owner populated.
pub struct PgBlogRepository {
    pool: Arc<PgPool>,
}

impl PgBlogRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogRepository for PgBlogRepository {
    async fn create(&self, new_blog: NewBlog) -> Result<Blog, AppError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            WITH inserted AS (
                INSERT INTO blogs (title, author, url, likes, user_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, title, author, url, likes, user_id
            )
            SELECT b.id, b.title, b.author, b.url, b.likes, b.user_id, u.username, u.name
            FROM inserted b
            LEFT JOIN users u ON u.id = b.user_id
            "#,
        )
        .bind(new_blog.title)
        .bind(new_blog.author)
        .bind(new_blog.url)
        .bind(new_blog.likes)
        .bind(new_blog.user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<Blog>, AppError> {
        let rows = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT b.id, b.title, b.author, b.url, b.likes, b.user_id, u.username, u.name
            FROM blogs b
            LEFT JOIN users u ON u.id = b.user_id
            ORDER BY b.id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Blog::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Blog>, AppError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT b.id, b.title, b.author, b.url, b.likes, b.user_id, u.username, u.name
            FROM blogs b
            LEFT JOIN users u ON u.id = b.user_id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Blog::from))
    }

    async fn update(&self, id: i64, patch: BlogPatch) -> Result<Option<Blog>, AppError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            WITH updated AS (
                UPDATE blogs
                SET title  = COALESCE($2, title),
                    author = COALESCE($3, author),
                    url    = COALESCE($4, url),
                    likes  = COALESCE($5, likes)
                WHERE id = $1
                RETURNING id, title, author, url, likes, user_id
            )
            SELECT b.id, b.title, b.author, b.url, b.likes, b.user_id, u.username, u.name
            FROM updated b
            LEFT JOIN users u ON u.id = b.user_id
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.author)
        .bind(patch.url)
        .bind(patch.likes)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Blog::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
