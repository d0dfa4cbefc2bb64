//! In-memory repository implementation.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::content::{Author, Category, NewCategory, NewPost, Post, PostView};
use scribe_core::storage::{
    CategoryRepository, PostRepository, RepositoryError, Result, UserRepository,
};
use scribe_core::users::User;

/// Rows keyed by id plus the last id handed out.
///
/// Ids are never reused after a delete, matching SQLite `AUTOINCREMENT`.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// In-memory storage backend.
///
/// Uses maps wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    categories: Arc<RwLock<Table<Category>>>,
    posts: Arc<RwLock<Table<Post>>>,
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn author_of(users: &HashMap<Uuid, User>, post: &Post) -> Option<Author> {
        let id = Uuid::parse_str(&post.author_id).ok()?;
        users.get(&id).map(|user| Author {
            first_name: user.first_name.clone(),
            email: user.email.clone(),
        })
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.rows.values().cloned().collect())
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.rows.get(&id).cloned())
    }

    async fn create_category(&self, category: &NewCategory) -> Result<Category> {
        let mut categories = self.categories.write().await;
        let now = Utc::now();
        let created = Category {
            id: categories.next_id(),
            title: category.title.clone(),
            content: category.content.clone(),
            created_at: now,
            updated_at: now,
        };
        categories.rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_category(&self, category: &Category) -> Result<()> {
        let mut categories = self.categories.write().await;
        match categories.rows.get_mut(&category.id) {
            Some(existing) => {
                *existing = category.clone();
                Ok(())
            }
            None => Err(RepositoryError::not_found("Category", category.id)),
        }
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        let mut categories = self.categories.write().await;
        categories
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("Category", id))
    }
}

#[async_trait]
impl PostRepository for InMemoryRepository {
    async fn list_posts(&self) -> Result<Vec<PostView>> {
        let posts = self.posts.read().await;
        let users = self.users.read().await;
        Ok(posts
            .rows
            .values()
            .filter_map(|post| Self::author_of(&users, post).map(|a| PostView::new(post, a)))
            .collect())
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>> {
        let posts = self.posts.read().await;
        Ok(posts.rows.get(&id).cloned())
    }

    async fn get_post_view(&self, id: i64) -> Result<Option<PostView>> {
        let posts = self.posts.read().await;
        let users = self.users.read().await;
        Ok(posts
            .rows
            .get(&id)
            .and_then(|post| Self::author_of(&users, post).map(|a| PostView::new(post, a))))
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post> {
        let users = self.users.read().await;
        let author_known = Uuid::parse_str(&post.author_id)
            .map(|id| users.contains_key(&id))
            .unwrap_or(false);
        if !author_known {
            return Err(RepositoryError::InvalidData(
                "Post references a missing record".to_string(),
            ));
        }

        let mut posts = self.posts.write().await;
        let now = Utc::now();
        let created = Post {
            id: posts.next_id(),
            title: post.title.clone(),
            content: post.content.clone(),
            author_id: post.author_id.clone(),
            created_at: now,
            updated_at: now,
        };
        posts.rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_post(&self, post: &Post) -> Result<()> {
        let mut posts = self.posts.write().await;
        match posts.rows.get_mut(&post.id) {
            Some(existing) => {
                *existing = post.clone();
                Ok(())
            }
            None => Err(RepositoryError::not_found("Post", post.id)),
        }
    }

    async fn delete_post(&self, id: i64) -> Result<()> {
        let mut posts = self.posts.write().await;
        posts
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("Post", id))
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::already_exists("User", &user.email));
        }
        if users.contains_key(&user.id) {
            return Err(RepositoryError::already_exists("User", user.id));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(RepositoryError::not_found("User", user.id)),
        }
    }
}
