//! Create/update operations over the repository ports.
//!
//! Every operation follows the same discipline: validate each field being
//! set, and only then touch the store. A validation failure is terminal for
//! that call and leaves persisted state exactly as it was.

use std::sync::Arc;

use crate::domain::{Author, AuthorPatch, NewAuthor, NewPost, Post, PostPatch};
use crate::error::{DomainError, RepoError};
use crate::ports::{AuthorRepository, PostRepository};

fn write_error(entity_type: &'static str, id: i32, err: RepoError) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::NotFound { entity_type, id },
        RepoError::Constraint(msg) => DomainError::Duplicate(msg),
        other => DomainError::Internal(other.to_string()),
    }
}

/// Author operations backed by an explicit store handle.
pub struct AuthorService {
    repo: Arc<dyn AuthorRepository>,
}

impl AuthorService {
    pub fn new(repo: Arc<dyn AuthorRepository>) -> Self {
        Self { repo }
    }

    /// Validate every supplied field, then insert.
    ///
    /// The name is checked against existing authors up front for a precise
    /// error; the store's unique constraint remains the authority under
    /// concurrent writes.
    pub async fn create(&self, new: NewAuthor) -> Result<Author, DomainError> {
        new.validate()?;

        let existing = self
            .repo
            .find_by_name(&new.name)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if existing.is_some() {
            return Err(DomainError::Duplicate(format!(
                "author name '{}' is already taken",
                new.name
            )));
        }

        self.repo.insert(new).await.map_err(|e| match e {
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            other => DomainError::Internal(other.to_string()),
        })
    }

    /// Validate the fields present in the patch, apply them to the stored
    /// record, and write it back. The store re-stamps `updated_at`.
    pub async fn update(&self, id: i32, patch: AuthorPatch) -> Result<Author, DomainError> {
        patch.validate()?;

        let mut author = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .ok_or(DomainError::NotFound {
                entity_type: "author",
                id,
            })?;

        // Nothing to change: no write, no updated_at re-stamp.
        if patch.is_empty() {
            return Ok(author);
        }

        author.apply(patch);

        self.repo
            .update(author)
            .await
            .map_err(|e| write_error("author", id, e))
    }

    pub async fn get(&self, id: i32) -> Result<Author, DomainError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .ok_or(DomainError::NotFound {
                entity_type: "author",
                id,
            })
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        self.repo
            .delete(id)
            .await
            .map_err(|e| write_error("author", id, e))
    }
}

/// Post operations backed by an explicit store handle.
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Validate all four fields, then insert.
    pub async fn create(&self, new: NewPost) -> Result<Post, DomainError> {
        new.validate()?;

        self.repo
            .insert(new)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    /// Validate the fields present in the patch, apply them to the stored
    /// record, and write it back.
    pub async fn update(&self, id: i32, patch: PostPatch) -> Result<Post, DomainError> {
        patch.validate()?;

        let mut post = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .ok_or(DomainError::NotFound {
                entity_type: "post",
                id,
            })?;

        // Nothing to change: no write, no updated_at re-stamp.
        if patch.is_empty() {
            return Ok(post);
        }

        post.apply(patch);

        self.repo
            .update(post)
            .await
            .map_err(|e| write_error("post", id, e))
    }

    pub async fn get(&self, id: i32) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .ok_or(DomainError::NotFound {
                entity_type: "post",
                id,
            })
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        self.repo
            .delete(id)
            .await
            .map_err(|e| write_error("post", id, e))
    }
}
