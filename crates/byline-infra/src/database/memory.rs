//! In-memory store implementations - used for tests and `minimal` builds.
//!
//! Same contract as the Postgres stores, including name uniqueness on
//! authors. Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use byline_core::domain::{Author, NewAuthor, NewPost, Post};
use byline_core::error::RepoError;
use byline_core::ports::{AuthorRepository, PostRepository};

struct AuthorTable {
    rows: HashMap<i32, Author>,
    next_id: i32,
}

/// In-memory author store using a HashMap behind an async RwLock.
pub struct InMemoryAuthorRepository {
    store: RwLock<AuthorTable>,
}

impl InMemoryAuthorRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(AuthorTable {
                rows: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryAuthorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthorRepository for InMemoryAuthorRepository {
    async fn insert(&self, new: NewAuthor) -> Result<Author, RepoError> {
        // Uniqueness and the insert happen under one write lock, mirroring
        // the transactional guarantee of the database unique index.
        let mut store = self.store.write().await;

        if store.rows.values().any(|a| a.name == new.name) {
            return Err(RepoError::Constraint(
                "an author with this name already exists".to_string(),
            ));
        }

        let id = store.next_id;
        store.next_id += 1;

        let now = Utc::now();
        let author = Author {
            id,
            name: new.name,
            phone_number: new.phone_number,
            created_at: now,
            updated_at: now,
        };
        store.rows.insert(id, author.clone());

        Ok(author)
    }

    async fn update(&self, mut author: Author) -> Result<Author, RepoError> {
        let mut store = self.store.write().await;

        if !store.rows.contains_key(&author.id) {
            return Err(RepoError::NotFound);
        }
        if store
            .rows
            .values()
            .any(|a| a.id != author.id && a.name == author.name)
        {
            return Err(RepoError::Constraint(
                "an author with this name already exists".to_string(),
            ));
        }

        author.updated_at = Utc::now();
        store.rows.insert(author.id, author.clone());

        Ok(author)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, RepoError> {
        let store = self.store.read().await;
        Ok(store.rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Author>, RepoError> {
        let store = self.store.read().await;
        Ok(store.rows.values().find(|a| a.name == name).cloned())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

struct PostTable {
    rows: HashMap<i32, Post>,
    next_id: i32,
}

/// In-memory post store.
pub struct InMemoryPostRepository {
    store: RwLock<PostTable>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(PostTable {
                rows: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, new: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        let id = store.next_id;
        store.next_id += 1;

        let now = Utc::now();
        let post = Post {
            id,
            title: new.title,
            content: new.content,
            category: new.category,
            summary: new.summary,
            created_at: now,
            updated_at: now,
        };
        store.rows.insert(id, post.clone());

        Ok(post)
    }

    async fn update(&self, mut post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        if !store.rows.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }

        post.updated_at = Utc::now();
        store.rows.insert(post.id, post.clone());

        Ok(post)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.rows.get(&id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use byline_core::domain::{AuthorPatch, PostPatch};
    use byline_core::error::DomainError;
    use byline_core::service::{AuthorService, PostService};

    use super::*;

    fn author_service() -> AuthorService {
        AuthorService::new(Arc::new(InMemoryAuthorRepository::new()))
    }

    fn post_service() -> PostService {
        PostService::new(Arc::new(InMemoryPostRepository::new()))
    }

    fn valid_post() -> NewPost {
        NewPost::new("Top 10 Secrets", "a".repeat(250), "Fiction", "A summary")
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let repo = InMemoryAuthorRepository::new();
        let first = repo.insert(NewAuthor::new("Jane Doe", None)).await.unwrap();
        let second = repo.insert(NewAuthor::new("John Roe", None)).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn duplicate_name_violates_the_constraint() {
        let repo = InMemoryAuthorRepository::new();
        repo.insert(NewAuthor::new("Jane Doe", None)).await.unwrap();
        let err = repo
            .insert(NewAuthor::new("Jane Doe", Some("5551234567".into())))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn renaming_onto_an_existing_name_violates_the_constraint() {
        let repo = InMemoryAuthorRepository::new();
        repo.insert(NewAuthor::new("Jane Doe", None)).await.unwrap();
        let mut other = repo.insert(NewAuthor::new("John Roe", None)).await.unwrap();

        other.name = "Jane Doe".into();
        assert!(matches!(
            repo.update(other).await.unwrap_err(),
            RepoError::Constraint(_)
        ));
    }

    #[tokio::test]
    async fn update_restamps_updated_at_only() {
        let repo = InMemoryPostRepository::new();
        let stored = repo.insert(valid_post()).await.unwrap();

        let updated = repo.update(stored.clone()).await.unwrap();
        assert_eq!(updated.created_at, stored.created_at);
        assert!(updated.updated_at >= stored.updated_at);
    }

    #[tokio::test]
    async fn delete_of_missing_id_is_not_found() {
        let repo = InMemoryPostRepository::new();
        assert!(matches!(
            repo.delete(99).await.unwrap_err(),
            RepoError::NotFound
        ));
    }

    // Service-level round trips over the in-memory stores.

    #[tokio::test]
    async fn create_post_at_the_boundary_lengths_succeeds() {
        let service = post_service();
        let post = service
            .create(NewPost::new(
                "Top 10 Secrets",
                "a".repeat(250),
                "Fiction",
                "b".repeat(250),
            ))
            .await
            .unwrap();
        assert_eq!(post.id, 1);
        assert_eq!(post.created_at, post.updated_at);
    }

    #[tokio::test]
    async fn create_post_with_short_content_fails_on_content() {
        let service = post_service();
        let err = service
            .create(NewPost::new(
                "Top 10 Secrets",
                "a".repeat(249),
                "Fiction",
                "A summary",
            ))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(v) if v.field == "content"
        ));
    }

    #[tokio::test]
    async fn create_post_without_clickbait_title_fails_on_title() {
        let service = post_service();
        let err = service
            .create(NewPost::new(
                "Breaking News",
                "a".repeat(250),
                "Non-Fiction",
                "A summary",
            ))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(v) if v.field == "title"
        ));
    }

    #[tokio::test]
    async fn update_post_revalidates_the_changed_field() {
        let service = post_service();
        let post = service.create(valid_post()).await.unwrap();

        let patch = PostPatch {
            summary: Some("s".repeat(251)),
            ..Default::default()
        };
        assert!(matches!(
            service.update(post.id, patch).await.unwrap_err(),
            DomainError::Validation(_)
        ));

        // The failed update left the stored record untouched.
        let stored = service.get(post.id).await.unwrap();
        assert_eq!(stored.summary, post.summary);
        assert_eq!(stored.updated_at, post.updated_at);
    }

    #[tokio::test]
    async fn empty_post_patch_does_not_restamp_updated_at() {
        let service = post_service();
        let post = service.create(valid_post()).await.unwrap();

        let unchanged = service.update(post.id, PostPatch::default()).await.unwrap();
        assert_eq!(unchanged.updated_at, post.updated_at);
    }

    #[tokio::test]
    async fn update_post_of_missing_id_is_not_found() {
        let service = post_service();
        let err = service
            .update(7, PostPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 7, .. }));
    }

    #[tokio::test]
    async fn second_author_with_the_same_name_is_rejected() {
        let service = author_service();
        service
            .create(NewAuthor::new("Jane Doe", Some("5551234567".into())))
            .await
            .unwrap();
        let err = service
            .create(NewAuthor::new("Jane Doe", None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[tokio::test]
    async fn author_update_sets_and_clears_the_phone_number() {
        let service = author_service();
        let author = service
            .create(NewAuthor::new("Jane Doe", None))
            .await
            .unwrap();

        let updated = service
            .update(
                author.id,
                AuthorPatch {
                    name: None,
                    phone_number: Some(Some("5551234567".into())),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.phone_number.as_deref(), Some("5551234567"));

        let cleared = service
            .update(
                author.id,
                AuthorPatch {
                    name: None,
                    phone_number: Some(None),
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.phone_number, None);
    }
}
