//! Shared fixtures for content service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use scribe_core::auth::{AuthError, Permissions, Principal, RequestGate, Result as AuthResult, Role};
use scribe_core::content::{Category, NewCategory, NewPost, Post, PostView};
use scribe_core::storage::{CategoryRepository, PostRepository, Result, UserRepository};
use scribe_core::users::User;

use super::ContentService;
use crate::cache::MemoryCache;
use crate::storage::inmemory::InMemoryRepository;
use crate::storage::CacheAsideStore;

pub const ADMIN: &str = "Bearer admin";
pub const READER: &str = "Bearer reader";
pub const WRITER: &str = "Bearer writer";
pub const OTHER_WRITER: &str = "Bearer other";

const WRITE_METHODS: [&str; 4] = ["GET", "POST", "PUT", "DELETE"];

fn user_id(header: &str) -> Uuid {
    match header {
        ADMIN => Uuid::from_u128(1),
        READER => Uuid::from_u128(2),
        WRITER => Uuid::from_u128(3),
        _ => Uuid::from_u128(4),
    }
}

/// The principal each fixture header resolves to.
pub fn principal(header: &str) -> Principal {
    let mut permissions = Permissions::new();
    let role = match header {
        ADMIN => Role::Admin,
        READER => {
            permissions.grant("categories", "GET");
            permissions.grant("posts", "GET");
            Role::User
        }
        _ => {
            for method in WRITE_METHODS {
                permissions.grant("categories", method);
                permissions.grant("posts", method);
            }
            Role::User
        }
    };
    Principal {
        user_id: user_id(header).to_string(),
        role,
        permissions,
        raw_token: header.trim_start_matches("Bearer ").to_string(),
    }
}

/// Gate that resolves a fixed set of headers.
pub struct StaticGate {
    principals: HashMap<&'static str, Principal>,
}

impl StaticGate {
    pub fn new() -> Self {
        let principals = [ADMIN, READER, WRITER, OTHER_WRITER]
            .into_iter()
            .map(|header| (header, principal(header)))
            .collect();
        Self { principals }
    }
}

#[async_trait]
impl RequestGate for StaticGate {
    async fn authenticate(&self, header: Option<&str>) -> AuthResult<Principal> {
        let header = header.ok_or(AuthError::MissingCredential)?;
        self.principals
            .get(header)
            .cloned()
            .ok_or_else(|| AuthError::InvalidToken("unknown token".to_string()))
    }
}

/// In-memory repository that counts calls.
#[derive(Default)]
pub struct CountingRepository {
    inner: InMemoryRepository,
    pub calls: AtomicUsize,
    pub list_calls: AtomicUsize,
}

impl CountingRepository {
    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn hit_list(&self) {
        self.hit();
        self.list_calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CategoryRepository for CountingRepository {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.hit_list();
        self.inner.list_categories().await
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>> {
        self.hit();
        self.inner.get_category(id).await
    }

    async fn create_category(&self, category: &NewCategory) -> Result<Category> {
        self.hit();
        self.inner.create_category(category).await
    }

    async fn update_category(&self, category: &Category) -> Result<()> {
        self.hit();
        self.inner.update_category(category).await
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        self.hit();
        self.inner.delete_category(id).await
    }
}

#[async_trait]
impl PostRepository for CountingRepository {
    async fn list_posts(&self) -> Result<Vec<PostView>> {
        self.hit_list();
        self.inner.list_posts().await
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>> {
        self.hit();
        self.inner.get_post(id).await
    }

    async fn get_post_view(&self, id: i64) -> Result<Option<PostView>> {
        self.hit();
        self.inner.get_post_view(id).await
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post> {
        self.hit();
        self.inner.create_post(post).await
    }

    async fn update_post(&self, post: &Post) -> Result<()> {
        self.hit();
        self.inner.update_post(post).await
    }

    async fn delete_post(&self, id: i64) -> Result<()> {
        self.hit();
        self.inner.delete_post(id).await
    }
}

pub struct Fixture {
    pub service: ContentService,
    pub repo: Arc<CountingRepository>,
}

/// Service over a counting in-memory repository with every fixture user
/// registered, so posts can join their authors.
pub async fn fixture() -> Fixture {
    let repo = Arc::new(CountingRepository::default());
    for (i, header) in [ADMIN, READER, WRITER, OTHER_WRITER].into_iter().enumerate() {
        let user = User::new("User", "Fixture", format!("user{i}@example.com"), "hash")
            .with_id(user_id(header));
        repo.inner
            .create_user(&user)
            .await
            .expect("fixture user is unique");
    }

    let store = CacheAsideStore::new(Arc::new(MemoryCache::new(100)));
    let service = ContentService::new(
        Arc::new(StaticGate::new()),
        repo.clone(),
        repo.clone(),
        store,
        Duration::from_secs(60),
    );
    Fixture { service, repo }
}
