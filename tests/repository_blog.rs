//! PostgreSQL blog repository tests. Run with `cargo test -- --ignored`
//! against a database reachable through `DATABASE_URL`.

use bloglist::domain::entities::{BlogPatch, NewBlog, NewUser};
use bloglist::domain::repositories::{BlogRepository, UserRepository};
use bloglist::infrastructure::persistence::{PgBlogRepository, PgUserRepository};
use sqlx::PgPool;
use std::sync::Arc;

async fn create_owner(pool: &PgPool, username: &str) -> i64 {
    PgUserRepository::new(Arc::new(pool.clone()))
        .create(NewUser {
            username: username.to_string(),
            name: Some("Owner".to_string()),
            password_hash: "$pbkdf2-sha256$i=1000,l=32$c2FsdA$aGFzaA".to_string(),
        })
        .await
        .unwrap()
        .id
}

fn new_blog(title: &str, likes: i64, user_id: Option<i64>) -> NewBlog {
    NewBlog {
        title: title.to_string(),
        author: "Michael Chan".to_string(),
        url: format!("https://blogs.example/{title}"),
        likes,
        user_id,
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_blog_populates_owner(pool: PgPool) {
    let owner_id = create_owner(&pool, "root").await;
    let repo = PgBlogRepository::new(Arc::new(pool));

    let blog = repo
        .create(new_blog("React patterns", 7, Some(owner_id)))
        .await
        .unwrap();

    assert!(blog.id > 0);
    assert_eq!(blog.likes, 7);
    let owner = blog.user.unwrap();
    assert_eq!(owner.id, owner_id);
    assert_eq!(owner.username, "root");
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_is_ordered_by_id(pool: PgPool) {
    let repo = PgBlogRepository::new(Arc::new(pool));

    repo.create(new_blog("first", 1, None)).await.unwrap();
    repo.create(new_blog("second", 2, None)).await.unwrap();

    let blogs = repo.list().await.unwrap();

    assert_eq!(blogs.len(), 2);
    assert_eq!(blogs[0].title, "first");
    assert!(blogs[0].user.is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_changes_only_given_fields(pool: PgPool) {
    let repo = PgBlogRepository::new(Arc::new(pool));
    let blog = repo.create(new_blog("Type wars", 2, None)).await.unwrap();

    let updated = repo
        .update(
            blog.id,
            BlogPatch {
                likes: Some(10),
                ..BlogPatch::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.likes, 10);
    assert_eq!(updated.title, "Type wars");
    assert_eq!(updated.url, blog.url);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_missing_blog(pool: PgPool) {
    let repo = PgBlogRepository::new(Arc::new(pool));

    let result = repo.update(999, BlogPatch::default()).await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_blog(pool: PgPool) {
    let repo = PgBlogRepository::new(Arc::new(pool));
    let blog = repo.create(new_blog("gone", 0, None)).await.unwrap();

    assert!(repo.delete(blog.id).await.unwrap());
    assert!(!repo.delete(blog.id).await.unwrap());
    assert!(repo.find_by_id(blog.id).await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_negative_likes_rejected_by_schema(pool: PgPool) {
    let repo = PgBlogRepository::new(Arc::new(pool));

    let result = repo.create(new_blog("bad", -1, None)).await;

    assert!(result.is_err());
}
