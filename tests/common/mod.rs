#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use bloglist::application::services::{AuthService, BlogService, UserService};
use bloglist::domain::entities::{Blog, BlogOwner, BlogPatch, NewBlog, NewUser, Session, User};
use bloglist::domain::repositories::{BlogRepository, SessionRepository, UserRepository};
use bloglist::error::AppError;
use bloglist::routes::api_router;
use bloglist::state::AppState;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

pub const TEST_HASH_ROUNDS: u32 = 1_000;
pub const TEST_SIGNING_SECRET: &str = "test-signing-secret";

#[derive(Debug, Clone)]
struct StoredBlog {
    id: i64,
    title: String,
    author: String,
    url: String,
    likes: i64,
    user_id: Option<i64>,
}

/// Shared tables behind the in-memory repositories.
#[derive(Default)]
struct Tables {
    users: Vec<User>,
    blogs: Vec<StoredBlog>,
    sessions: Vec<Session>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn to_blog(&self, stored: &StoredBlog) -> Blog {
        let user = stored.user_id.and_then(|user_id| {
            self.users.iter().find(|u| u.id == user_id).map(|u| BlogOwner {
                id: u.id,
                username: u.username.clone(),
                name: u.name.clone(),
            })
        });

        Blog {
            id: stored.id,
            title: stored.title.clone(),
            author: stored.author.clone(),
            url: stored.url.clone(),
            likes: stored.likes,
            user,
        }
    }
}

/// In-memory stand-in for PostgreSQL, implementing every repository trait.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn blog_count(&self) -> usize {
        self.tables.lock().unwrap().blogs.len()
    }

    /// Inserts a blog directly, bypassing services and validation.
    pub fn seed_blog(
        &self,
        title: &str,
        author: &str,
        url: &str,
        likes: i64,
        user_id: Option<i64>,
    ) -> i64 {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        tables.blogs.push(StoredBlog {
            id,
            title: title.to_string(),
            author: author.to_string(),
            url: url.to_string(),
            likes,
            user_id,
        });
        id
    }
}

#[async_trait]
impl BlogRepository for MemoryStore {
    async fn create(&self, new_blog: NewBlog) -> Result<Blog, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let stored = StoredBlog {
            id: tables.next_id(),
            title: new_blog.title,
            author: new_blog.author,
            url: new_blog.url,
            likes: new_blog.likes,
            user_id: new_blog.user_id,
        };
        tables.blogs.push(stored.clone());
        Ok(tables.to_blog(&stored))
    }

    async fn list(&self) -> Result<Vec<Blog>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.blogs.iter().map(|b| tables.to_blog(b)).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Blog>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .blogs
            .iter()
            .find(|b| b.id == id)
            .map(|b| tables.to_blog(b)))
    }

    async fn update(&self, id: i64, patch: BlogPatch) -> Result<Option<Blog>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(stored) = tables.blogs.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            stored.title = title;
        }
        if let Some(author) = patch.author {
            stored.author = author;
        }
        if let Some(url) = patch.url {
            stored.url = url;
        }
        if let Some(likes) = patch.likes {
            stored.likes = likes;
        }

        let stored = stored.clone();
        Ok(Some(tables.to_blog(&stored)))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.blogs.len();
        tables.blogs.retain(|b| b.id != id);
        Ok(tables.blogs.len() < before)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.username == new_user.username) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "users_username_key" }),
            ));
        }

        let user = User {
            id: tables.next_id(),
            username: new_user.username,
            name: new_user.name,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.tables.lock().unwrap().users.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.tables.lock().unwrap().users.len() as i64)
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn create(
        &self,
        user_id: i64,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let session = Session {
            id: tables.next_id(),
            user_id,
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            expires_at,
            revoked_at: None,
        };
        tables.sessions.push(session.clone());
        Ok(session)
    }

    async fn find_active_user(&self, token_hash: &str) -> Result<Option<i64>, AppError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .sessions
            .iter()
            .find(|s| s.token_hash == token_hash && s.is_active())
            .map(|s| s.user_id))
    }

    async fn revoke(&self, token_hash: &str) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        match tables
            .sessions
            .iter_mut()
            .find(|s| s.token_hash == token_hash && s.revoked_at.is_none())
        {
            Some(session) => {
                session.revoked_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn purge_expired(&self) -> Result<u64, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.sessions.len();
        tables.sessions.retain(|s| s.is_active());
        Ok((before - tables.sessions.len()) as u64)
    }
}

/// Always fails, for exercising degraded paths.
pub struct BrokenUserRepository;

#[async_trait]
impl UserRepository for BrokenUserRepository {
    async fn create(&self, _new_user: NewUser) -> Result<User, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<User>, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }

    async fn find_by_username(&self, _username: &str) -> Result<Option<User>, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }
}

pub fn create_test_state(store: &MemoryStore) -> AppState {
    let repo = Arc::new(store.clone());

    AppState::new(
        Arc::new(BlogService::new(repo.clone())),
        Arc::new(UserService::new(repo.clone(), repo.clone(), TEST_HASH_ROUNDS)),
        Arc::new(AuthService::new(
            repo.clone(),
            repo,
            TEST_SIGNING_SECRET.to_string(),
            Duration::hours(1),
        )),
    )
}

/// Builds a test server over a fresh in-memory store.
pub fn make_server() -> (TestServer, MemoryStore) {
    let store = MemoryStore::default();
    let server = TestServer::new(api_router(create_test_state(&store))).unwrap();
    (server, store)
}

pub async fn create_user(server: &TestServer, username: &str, password: &str) -> Value {
    let response = server
        .post("/api/users")
        .json(&json!({ "username": username, "name": "Test User", "password": password }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

pub async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/api/login")
        .json(&json!({ "username": username, "password": password }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Registers `username` and returns a bearer token for it.
pub async fn create_user_and_login(server: &TestServer, username: &str) -> String {
    create_user(server, username, "sekret").await;
    login(server, username, "sekret").await
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub fn initial_blogs() -> Vec<Value> {
    vec![
        json!({
            "title": "testiyksi",
            "author": "testimies",
            "url": "https://testi.example/yksi",
            "likes": 1
        }),
        json!({
            "title": "testikaksi",
            "author": "testinainen",
            "url": "https://testi.example/kaksi",
            "likes": 2
        }),
    ]
}

/// Posts [`initial_blogs`] as the given user.
pub async fn seed_initial_blogs(server: &TestServer, token: &str) {
    for blog in initial_blogs() {
        server
            .post("/api/blogs")
            .add_header("Authorization", bearer(token))
            .json(&blog)
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }
}
