//! Handlers for blog endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::blog::{BlogResponse, CreateBlogRequest, UpdateBlogRequest};
use crate::api::middleware::auth::AuthUser;
use crate::application::services::BlogStats;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every blog with its owner.
///
/// # Endpoint
///
/// `GET /api/blogs`
pub async fn list_blogs_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let blogs = state.blog_service.list().await?;
    Ok(Json(blogs.into_iter().map(BlogResponse::from).collect()))
}

/// Returns a single blog.
///
/// # Endpoint
///
/// `GET /api/blogs/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the blog doesn't exist.
pub async fn get_blog_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<BlogResponse>, AppError> {
    let blog = state.blog_service.get(id).await?;
    Ok(Json(blog.into()))
}

/// Creates a blog owned by the authenticated user.
///
/// # Endpoint
///
/// `POST /api/blogs` (Bearer token required)
///
/// # Request Body
///
/// ```json
/// {
///   "title": "React patterns",
///   "author": "Michael Chan",
///   "url": "https://reactpatterns.com/",
///   "likes": 7   // optional, defaults to 0
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `title` or `url` is missing.
/// Returns 401 Unauthorized without a valid session token.
pub async fn create_blog_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateBlogRequest>,
) -> Result<(StatusCode, Json<BlogResponse>), AppError> {
    payload.validate()?;

    let blog = state
        .blog_service
        .create(payload.into_new_blog(auth.user.id))
        .await?;

    Ok((StatusCode::CREATED, Json(blog.into())))
}

/// Partially updates a blog, typically to change its like count.
///
/// # Endpoint
///
/// `PUT /api/blogs/{id}`
///
/// # Request Body
///
/// All fields are optional. Only provided fields are changed.
///
/// ```json
/// { "likes": 8 }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the blog doesn't exist.
/// Returns 400 Bad Request if validation fails.
pub async fn update_blog_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateBlogRequest>,
) -> Result<Json<BlogResponse>, AppError> {
    payload.validate()?;

    let blog = state.blog_service.update(id, payload.into()).await?;

    Ok(Json(blog.into()))
}

/// Deletes a blog. Only its creator may do so.
///
/// # Endpoint
///
/// `DELETE /api/blogs/{id}` (Bearer token required)
///
/// # Errors
///
/// Returns 404 Not Found if the blog doesn't exist.
/// Returns 403 Forbidden if the caller did not create the blog.
pub async fn delete_blog_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<StatusCode, AppError> {
    state.blog_service.delete(id, auth.user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Returns like and authorship statistics over all blogs.
///
/// # Endpoint
///
/// `GET /api/blogs/stats`
///
/// # Response
///
/// ```json
/// {
///   "blog_count": 2,
///   "total_likes": 3,
///   "favourite": { "title": "testikaksi", "author": "testinainen", "likes": 2 },
///   "most_blogs": { "author": "testimies", "count": 1 },
///   "most_likes": { "author": "testinainen", "likes": 2 }
/// }
/// ```
///
/// Leader fields are `null` when no blogs are stored.
pub async fn blog_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<BlogStats>, AppError> {
    Ok(Json(state.blog_service.stats().await?))
}
