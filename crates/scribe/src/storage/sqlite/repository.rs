//! SQLite repository implementation.
//!
//! Implements the repository traits from `scribe_core::storage` using SQLite.

use async_trait::async_trait;
use chrono::Utc;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use scribe_core::content::{Category, NewCategory, NewPost, Post, PostView};
use scribe_core::storage::{
    CategoryRepository, PostRepository, RepositoryError, Result, UserRepository,
};
use scribe_core::users::User;

use super::conversions::{
    format_datetime, permissions_to_json, row_to_category, row_to_post, row_to_post_view,
    row_to_user,
};
use super::error::{map_tokio_rusqlite_error, ErrorContext};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Fails with `QueryReturnedNoRows` when a write touched nothing.
fn expect_rows(rows: usize) -> std::result::Result<(), tokio_rusqlite::Error> {
    if rows == 0 {
        Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
    } else {
        Ok(())
    }
}

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for all entity types.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// CategoryRepository implementation
// ============================================================================

#[async_trait]
impl CategoryRepository for SqliteRepository {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_CATEGORIES).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_category).map_err(wrap_err)?;
                rows.collect::<rusqlite::Result<Vec<_>>>().map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ErrorContext::entity("Category")))
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_CATEGORY_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([id], row_to_category) {
                    Ok(category) => Ok(Some(category)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ErrorContext::entity("Category")))
    }

    async fn create_category(&self, category: &NewCategory) -> Result<Category> {
        let now = Utc::now();
        let title = category.title.clone();
        let content = category.content.clone();
        let timestamp = format_datetime(&now);

        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_CATEGORY,
                    rusqlite::params![title, content, timestamp, timestamp],
                )
                .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ErrorContext::entity("Category")))?;

        Ok(Category {
            id,
            title: category.title.clone(),
            content: category.content.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn update_category(&self, category: &Category) -> Result<()> {
        let id = category.id;
        let title = category.title.clone();
        let content = category.content.clone();
        let updated_at = format_datetime(&category.updated_at);
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_CATEGORY,
                        rusqlite::params![id, title, content, updated_at],
                    )
                    .map_err(wrap_err)?;
                expect_rows(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ErrorContext::with_id("Category", &id_str)))
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_CATEGORY, [id])
                    .map_err(wrap_err)?;
                expect_rows(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ErrorContext::with_id("Category", &id_str)))
    }
}

// ============================================================================
// PostRepository implementation
// ============================================================================

#[async_trait]
impl PostRepository for SqliteRepository {
    async fn list_posts(&self) -> Result<Vec<PostView>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_POST_VIEWS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_post_view).map_err(wrap_err)?;
                rows.collect::<rusqlite::Result<Vec<_>>>().map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ErrorContext::entity("Post")))
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_POST_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([id], row_to_post) {
                    Ok(post) => Ok(Some(post)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ErrorContext::entity("Post")))
    }

    async fn get_post_view(&self, id: i64) -> Result<Option<PostView>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_POST_VIEW_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([id], row_to_post_view) {
                    Ok(view) => Ok(Some(view)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ErrorContext::entity("Post")))
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post> {
        let now = Utc::now();
        let title = post.title.clone();
        let content = post.content.clone();
        let author_id = post.author_id.clone();
        let timestamp = format_datetime(&now);

        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_POST,
                    rusqlite::params![title, content, author_id, timestamp, timestamp],
                )
                .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ErrorContext::entity("Post")))?;

        Ok(Post {
            id,
            title: post.title.clone(),
            content: post.content.clone(),
            author_id: post.author_id.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn update_post(&self, post: &Post) -> Result<()> {
        let id = post.id;
        let title = post.title.clone();
        let content = post.content.clone();
        let updated_at = format_datetime(&post.updated_at);
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_POST,
                        rusqlite::params![id, title, content, updated_at],
                    )
                    .map_err(wrap_err)?;
                expect_rows(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ErrorContext::with_id("Post", &id_str)))
    }

    async fn delete_post(&self, id: i64) -> Result<()> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn.execute(schema::DELETE_POST, [id]).map_err(wrap_err)?;
                expect_rows(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ErrorContext::with_id("Post", &id_str)))
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_USER_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ErrorContext::entity("User")))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_USER_BY_EMAIL)
                    .map_err(wrap_err)?;
                match stmt.query_row([&email], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ErrorContext::entity("User")))
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let id = user.id.to_string();
        let first_name = user.first_name.clone();
        let last_name = user.last_name.clone();
        let email = user.email.clone();
        let password_hash = user.password_hash.clone();
        let role = user.role.to_string();
        let permissions = permissions_to_json(&user.permissions)?;
        let created_at = format_datetime(&user.created_at);
        let user_email = user.email.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_USER,
                    rusqlite::params![
                        id,
                        first_name,
                        last_name,
                        email,
                        password_hash,
                        role,
                        permissions,
                        created_at
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ErrorContext::with_id("User", &user_email)))
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let id = user.id.to_string();
        let first_name = user.first_name.clone();
        let last_name = user.last_name.clone();
        let email = user.email.clone();
        let password_hash = user.password_hash.clone();
        let role = user.role.to_string();
        let permissions = permissions_to_json(&user.permissions)?;
        let user_id = user.id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_USER,
                        rusqlite::params![
                            id,
                            first_name,
                            last_name,
                            email,
                            password_hash,
                            role,
                            permissions
                        ],
                    )
                    .map_err(wrap_err)?;
                expect_rows(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ErrorContext::with_id("User", &user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::auth::{Permissions, Role};

    async fn repo() -> SqliteRepository {
        SqliteRepository::new_in_memory().await.unwrap()
    }

    fn ada() -> User {
        User::new("Ada", "Lovelace", "ada@example.com", "$argon2id$hash")
    }

    #[tokio::test]
    async fn test_category_crud() {
        let repo = repo().await;
        assert!(repo.list_categories().await.unwrap().is_empty());

        let created = repo
            .create_category(&NewCategory::new("Rust", "Systems"))
            .await
            .unwrap();
        assert!(created.id > 0);

        let mut fetched = repo.get_category(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        fetched.content = "Ownership".to_string();
        repo.update_category(&fetched).await.unwrap();
        let listed = repo.list_categories().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].content, "Ownership");

        repo.delete_category(created.id).await.unwrap();
        assert!(repo.get_category(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_category_writes_are_not_found() {
        let repo = repo().await;
        assert!(matches!(
            repo.delete_category(99).await,
            Err(RepositoryError::NotFound { entity_type: "Category", .. })
        ));
    }

    #[tokio::test]
    async fn test_posts_join_author() {
        let repo = repo().await;
        let user = ada();
        repo.create_user(&user).await.unwrap();

        let first = repo
            .create_post(&NewPost::new("One", "1", user.id.to_string()))
            .await
            .unwrap();
        repo.create_post(&NewPost::new("Two", "2", user.id.to_string()))
            .await
            .unwrap();

        let views = repo.list_posts().await.unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id, first.id);
        assert_eq!(views[0].user.first_name, "Ada");
        assert_eq!(views[1].title, "Two");

        let view = repo.get_post_view(first.id).await.unwrap().unwrap();
        assert_eq!(view.user.email, "ada@example.com");

        let post = repo.get_post(first.id).await.unwrap().unwrap();
        assert!(post.is_authored_by(&user.id.to_string()));
    }

    #[tokio::test]
    async fn test_post_with_unknown_author_is_invalid() {
        let repo = repo().await;
        let result = repo
            .create_post(&NewPost::new("Orphan", "x", Uuid::new_v4().to_string()))
            .await;
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_user_round_trip_and_duplicate_email() {
        let repo = repo().await;
        let user = ada()
            .with_role(Role::Admin)
            .with_permissions(Permissions::new().with("posts", "GET"));
        repo.create_user(&user).await.unwrap();

        let by_email = repo
            .get_user_by_email("ada@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, user.id);
        assert_eq!(by_email.role, Role::Admin);
        assert!(by_email.permissions.allows("posts", "GET"));

        let duplicate = repo.create_user(&ada()).await;
        assert!(matches!(
            duplicate,
            Err(RepositoryError::AlreadyExists { entity_type: "User", .. })
        ));
    }

    #[tokio::test]
    async fn test_update_user_permissions() {
        let repo = repo().await;
        let mut user = ada();
        repo.create_user(&user).await.unwrap();

        user.permissions.grant("categories", "POST");
        repo.update_user(&user).await.unwrap();

        let stored = repo.get_user(user.id).await.unwrap().unwrap();
        assert!(stored.permissions.allows("categories", "POST"));
    }
}
