//! PostgreSQL store implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, Set};

use byline_core::domain::{Author, NewAuthor, NewPost, Post};
use byline_core::error::RepoError;
use byline_core::ports::{AuthorRepository, PostRepository};

use super::entity::author::{self, Entity as AuthorEntity};
use super::entity::post::{self, Entity as PostEntity};

/// Map a SeaORM error to the repository contract. Unique-index violations
/// become `Constraint`, a write that matched no row becomes `NotFound`.
fn map_db_err(e: DbErr) -> RepoError {
    if matches!(e, DbErr::RecordNotUpdated) {
        return RepoError::NotFound;
    }
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("record violates a unique constraint".to_string())
    } else {
        RepoError::Query(err_str)
    }
}

/// PostgreSQL author store. `authors.name` carries a unique index, so the
/// check-then-insert race under concurrent writes is resolved by Postgres.
pub struct PostgresAuthorRepository {
    db: DbConn,
}

impl PostgresAuthorRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn insert(&self, new: NewAuthor) -> Result<Author, RepoError> {
        let now = Utc::now();
        let model = author::ActiveModel {
            name: Set(new.name),
            phone_number: Set(new.phone_number),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let stored = model.insert(&self.db).await.map_err(map_db_err)?;
        Ok(stored.into())
    }

    async fn update(&self, mut author: Author) -> Result<Author, RepoError> {
        author.updated_at = Utc::now();
        let model: author::ActiveModel = author.into();

        let stored = model.update(&self.db).await.map_err(map_db_err)?;
        Ok(stored.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, RepoError> {
        let result = AuthorEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Author>, RepoError> {
        tracing::debug!(author_name = %name, "Finding author by name");

        let result = AuthorEntity::find()
            .filter(author::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let result = AuthorEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

/// PostgreSQL post store.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, new: NewPost) -> Result<Post, RepoError> {
        let now = Utc::now();
        let model = post::ActiveModel {
            title: Set(new.title),
            content: Set(new.content),
            category: Set(new.category),
            summary: Set(new.summary),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let stored = model.insert(&self.db).await.map_err(map_db_err)?;
        Ok(stored.into())
    }

    async fn update(&self, mut post: Post) -> Result<Post, RepoError> {
        post.updated_at = Utc::now();
        let model: post::ActiveModel = post.into();

        let stored = model.update(&self.db).await.map_err(map_db_err)?;
        Ok(stored.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_maps_to_constraint() {
        // Wording Postgres uses for a violated unique index.
        let err = DbErr::Custom(
            "duplicate key value violates unique constraint \"authors_name_key\"".to_owned(),
        );
        assert!(matches!(map_db_err(err), RepoError::Constraint(_)));
    }

    #[test]
    fn record_not_updated_maps_to_not_found() {
        assert!(matches!(
            map_db_err(DbErr::RecordNotUpdated),
            RepoError::NotFound
        ));
    }

    #[test]
    fn other_errors_map_to_query() {
        let err = DbErr::Custom("connection reset by peer".to_owned());
        assert!(matches!(map_db_err(err), RepoError::Query(_)));
    }
}
