use async_trait::async_trait;

use crate::domain::{Author, NewAuthor, NewPost, Post};
use crate::error::RepoError;

/// Author store. The store assigns `id` and both timestamps on `insert` and
/// re-stamps `updated_at` on every successful `update`; callers never supply
/// either. Name uniqueness is a store invariant, enforced transactionally.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Insert a validated draft, returning the stored record with its
    /// assigned id and timestamps. A duplicate name fails with
    /// [`RepoError::Constraint`].
    async fn insert(&self, new: NewAuthor) -> Result<Author, RepoError>;

    /// Write back a modified record, re-stamping `updated_at`.
    /// Fails with [`RepoError::NotFound`] if the id no longer exists.
    async fn update(&self, author: Author) -> Result<Author, RepoError>;

    /// Find an author by id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, RepoError>;

    /// Find an author by their unique name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Author>, RepoError>;

    /// Delete an author by id. Fails with [`RepoError::NotFound`] if absent.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}

/// Post store. Same id/timestamp discipline as [`AuthorRepository`];
/// posts carry no uniqueness constraint.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, new: NewPost) -> Result<Post, RepoError>;

    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError>;

    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}
