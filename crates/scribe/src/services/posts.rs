use chrono::Utc;

use scribe_core::auth::Principal;
use scribe_core::cache::POSTS_KEY;
use scribe_core::content::operations::{CREATE_POST, DELETE_POST, GET_POST, LIST_POSTS, UPDATE_POST};
use scribe_core::content::{CreateContentRequest, Post, PostView, UpdateContentRequest};
use scribe_core::pagination::{paginate, Page, PageRequest};
use scribe_core::service::{Outcome, ServiceError, ServiceResult};

use super::ContentService;

impl ContentService {
    pub async fn list_posts(
        &self,
        credential: Option<&str>,
        request: PageRequest,
    ) -> ServiceResult<Outcome<Page<PostView>>> {
        self.gate.admit(credential, &LIST_POSTS).await?;

        let all = self
            .store
            .get_or_load(POSTS_KEY, self.ttl, || self.posts.list_posts())
            .await?;

        Ok(Outcome::Ok(paginate(&all, request.page, request.limit)))
    }

    pub async fn get_post(
        &self,
        credential: Option<&str>,
        id: i64,
    ) -> ServiceResult<Outcome<PostView>> {
        self.gate.admit(credential, &GET_POST).await?;

        let view = self
            .posts
            .get_post_view(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post"))?;
        Ok(Outcome::Ok(view))
    }

    /// The caller becomes the post's author.
    pub async fn create_post(
        &self,
        credential: Option<&str>,
        request: CreateContentRequest,
    ) -> ServiceResult<Outcome<Post>> {
        let principal = self.gate.admit(credential, &CREATE_POST).await?;
        let new_post = request.into_new_post(&principal.user_id)?;

        let post = self.posts.create_post(&new_post).await?;
        self.store.invalidate(POSTS_KEY).await;

        tracing::debug!(post_id = post.id, author_id = %post.author_id, "Created post");
        Ok(Outcome::Created(post))
    }

    /// Only the author may update a post, administrators included.
    pub async fn update_post(
        &self,
        credential: Option<&str>,
        id: i64,
        request: UpdateContentRequest,
    ) -> ServiceResult<Outcome<Post>> {
        let principal = self.gate.admit(credential, &UPDATE_POST).await?;
        let changes = request.validate()?;

        let mut post = self.find_post(id).await?;
        ensure_author(&post, &principal, "Cannot update post")?;

        changes.apply_to_post(&mut post);
        post.updated_at = Utc::now();

        self.posts.update_post(&post).await?;
        self.store.invalidate(POSTS_KEY).await;

        tracing::debug!(post_id = id, "Updated post");
        Ok(Outcome::Updated(post))
    }

    pub async fn delete_post(
        &self,
        credential: Option<&str>,
        id: i64,
    ) -> ServiceResult<Outcome<Post>> {
        let principal = self.gate.admit(credential, &DELETE_POST).await?;

        let post = self.find_post(id).await?;
        ensure_author(&post, &principal, "Cannot delete post")?;

        self.posts.delete_post(id).await?;
        self.store.invalidate(POSTS_KEY).await;

        tracing::debug!(post_id = id, "Deleted post");
        Ok(Outcome::Deleted(post))
    }

    async fn find_post(&self, id: i64) -> ServiceResult<Post> {
        self.posts
            .get_post(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post"))
    }
}

fn ensure_author(post: &Post, principal: &Principal, message: &str) -> ServiceResult<()> {
    if post.is_authored_by(&principal.user_id) {
        Ok(())
    } else {
        tracing::debug!(post_id = post.id, user_id = %principal.user_id, "Rejected non-author write");
        Err(ServiceError::BadRequest(message.to_string()))
    }
}
