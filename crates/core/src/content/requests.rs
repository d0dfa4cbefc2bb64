//! Request payloads for content writes.
//!
//! Fields are optional at the serde level so that missing fields surface as
//! field-level validation errors instead of body rejections.

use serde::Deserialize;

use super::{Category, NewCategory, NewPost, Post};
use crate::validation::{required, ValidationErrors};

/// Request payload for creating a category or a post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateContentRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl CreateContentRequest {
    fn validate(self) -> Result<(String, String), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let title = required(&mut errors, "title", self.title);
        let content = required(&mut errors, "content", self.content);
        errors.into_result((title, content))
    }

    pub fn into_new_category(self) -> Result<NewCategory, ValidationErrors> {
        let (title, content) = self.validate()?;
        Ok(NewCategory::new(title, content))
    }

    pub fn into_new_post(self, author_id: &str) -> Result<NewPost, ValidationErrors> {
        let (title, content) = self.validate()?;
        Ok(NewPost::new(title, content, author_id))
    }
}

/// Request payload for updating a category or a post.
///
/// `content` is required; `title` is replaced only when present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContentRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Validated update fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentChanges {
    pub title: Option<String>,
    pub content: String,
}

impl UpdateContentRequest {
    pub fn validate(self) -> Result<ContentChanges, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let content = required(&mut errors, "content", self.content);
        let title = match self.title {
            Some(t) if t.trim().is_empty() => {
                errors.add("title", "title must not be blank");
                None
            }
            Some(t) => Some(t.trim().to_string()),
            None => None,
        };
        errors.into_result(ContentChanges { title, content })
    }
}

impl ContentChanges {
    pub fn apply_to_category(&self, category: &mut Category) {
        if let Some(title) = &self.title {
            category.title = title.clone();
        }
        category.content = self.content.clone();
    }

    pub fn apply_to_post(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        post.content = self.content.clone();
    }
}
