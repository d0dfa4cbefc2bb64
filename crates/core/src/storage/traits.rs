use async_trait::async_trait;
use uuid::Uuid;

use crate::content::{Category, NewCategory, NewPost, Post, PostView};
use crate::users::User;

use super::Result;

/// Repository for category operations.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Gets every category, oldest first.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// Gets a category by its ID.
    async fn get_category(&self, id: i64) -> Result<Option<Category>>;

    /// Creates a category and returns it with its assigned ID.
    async fn create_category(&self, category: &NewCategory) -> Result<Category>;

    /// Updates an existing category.
    async fn update_category(&self, category: &Category) -> Result<()>;

    /// Deletes a category by its ID.
    async fn delete_category(&self, id: i64) -> Result<()>;
}

/// Repository for post operations.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Gets every post joined with its author, oldest first.
    async fn list_posts(&self) -> Result<Vec<PostView>>;

    /// Gets a post by its ID.
    async fn get_post(&self, id: i64) -> Result<Option<Post>>;

    /// Gets a post joined with its author.
    async fn get_post_view(&self, id: i64) -> Result<Option<PostView>>;

    /// Creates a post and returns it with its assigned ID.
    async fn create_post(&self, post: &NewPost) -> Result<Post>;

    /// Updates an existing post.
    async fn update_post(&self, post: &Post) -> Result<()>;

    /// Deletes a post by its ID.
    async fn delete_post(&self, id: i64) -> Result<()>;
}

/// Repository for user operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets a user by their ID.
    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Gets a user by their (normalized) email address.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Creates a new user. Fails with `AlreadyExists` on a duplicate email.
    async fn create_user(&self, user: &User) -> Result<()>;

    /// Updates an existing user.
    async fn update_user(&self, user: &User) -> Result<()>;
}
