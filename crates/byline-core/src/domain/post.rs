use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validate;
use crate::error::ValidationError;

/// Post entity - a blog post with a clickbait title.
///
/// Every stored post satisfies all field predicates simultaneously; a record
/// failing any one of them is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub category: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field values for a post that has not been persisted yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: String,
    pub summary: String,
}

impl NewPost {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: category.into(),
            summary: summary.into(),
        }
    }

    /// Run all four field validators. Fails on the first violated predicate.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::validate_title(&self.title)?;
        validate::validate_content(&self.content)?;
        validate::validate_category(&self.category)?;
        validate::validate_summary(&self.summary)?;
        Ok(())
    }
}

/// Partial update for a post. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub summary: Option<String>,
}

impl PostPatch {
    /// Check exactly the fields present in the patch.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate::validate_title(title)?;
        }
        if let Some(content) = &self.content {
            validate::validate_content(content)?;
        }
        if let Some(category) = &self.category {
            validate::validate_category(category)?;
        }
        if let Some(summary) = &self.summary {
            validate::validate_summary(summary)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.category.is_none()
            && self.summary.is_none()
    }
}

impl Post {
    /// Apply an already-validated patch. `updated_at` is re-stamped by the
    /// store when the record is written back.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(summary) = patch.summary {
            self.summary = summary;
        }
    }
}
