use chrono::Utc;

use scribe_core::cache::CATEGORIES_KEY;
use scribe_core::content::operations::{
    CREATE_CATEGORY, DELETE_CATEGORY, GET_CATEGORY, LIST_CATEGORIES, UPDATE_CATEGORY,
};
use scribe_core::content::{Category, CreateContentRequest, UpdateContentRequest};
use scribe_core::pagination::{paginate, Page, PageRequest};
use scribe_core::service::{Outcome, ServiceError, ServiceResult};

use super::ContentService;

impl ContentService {
    pub async fn list_categories(
        &self,
        credential: Option<&str>,
        request: PageRequest,
    ) -> ServiceResult<Outcome<Page<Category>>> {
        self.gate.admit(credential, &LIST_CATEGORIES).await?;

        let all = self
            .store
            .get_or_load(CATEGORIES_KEY, self.ttl, || self.categories.list_categories())
            .await?;

        Ok(Outcome::Ok(paginate(&all, request.page, request.limit)))
    }

    pub async fn get_category(
        &self,
        credential: Option<&str>,
        id: i64,
    ) -> ServiceResult<Outcome<Category>> {
        self.gate.admit(credential, &GET_CATEGORY).await?;

        let category = self.find_category(id).await?;
        Ok(Outcome::Ok(category))
    }

    pub async fn create_category(
        &self,
        credential: Option<&str>,
        request: CreateContentRequest,
    ) -> ServiceResult<Outcome<Category>> {
        self.gate.admit(credential, &CREATE_CATEGORY).await?;
        let new_category = request.into_new_category()?;

        let category = self.categories.create_category(&new_category).await?;
        self.store.invalidate(CATEGORIES_KEY).await;

        tracing::debug!(category_id = category.id, "Created category");
        Ok(Outcome::Created(category))
    }

    pub async fn update_category(
        &self,
        credential: Option<&str>,
        id: i64,
        request: UpdateContentRequest,
    ) -> ServiceResult<Outcome<Category>> {
        self.gate.admit(credential, &UPDATE_CATEGORY).await?;
        let changes = request.validate()?;

        let mut category = self.find_category(id).await?;
        changes.apply_to_category(&mut category);
        category.updated_at = Utc::now();

        self.categories.update_category(&category).await?;
        self.store.invalidate(CATEGORIES_KEY).await;

        tracing::debug!(category_id = id, "Updated category");
        Ok(Outcome::Updated(category))
    }

    pub async fn delete_category(
        &self,
        credential: Option<&str>,
        id: i64,
    ) -> ServiceResult<Outcome<Category>> {
        self.gate.admit(credential, &DELETE_CATEGORY).await?;

        let category = self.find_category(id).await?;
        self.categories.delete_category(id).await?;
        self.store.invalidate(CATEGORIES_KEY).await;

        tracing::debug!(category_id = id, "Deleted category");
        Ok(Outcome::Deleted(category))
    }

    async fn find_category(&self, id: i64) -> ServiceResult<Category> {
        self.categories
            .get_category(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category"))
    }
}
