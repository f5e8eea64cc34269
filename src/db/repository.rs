use async_trait::async_trait;

use super::entity::Entity;
use crate::users::repo_types::User;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Unique or foreign-key rule rejected the write.
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() || db.is_foreign_key_violation() {
                return RepoError::Constraint(db.message().to_string());
            }
        }
        RepoError::Database(e)
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

/// CRUD over one entity table. Every call is its own unit of work.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Insert and return the stored row carrying its generated id.
    async fn add(&self, entity: T) -> RepoResult<T>;

    async fn get_all(&self) -> RepoResult<Vec<T>>;

    /// `Ok(None)` when no row has this id.
    async fn get_by_id(&self, id: i32) -> RepoResult<Option<T>>;

    /// Overwrite every column of the row matching `entity.id()`.
    /// Returns `false` when no row matched.
    async fn update(&self, entity: &T) -> RepoResult<bool>;

    /// Returns `false` when no row matched. Dependent rows follow the
    /// schema's cascade rules.
    async fn delete(&self, entity: &T) -> RepoResult<bool>;
}

/// The user aggregate, with its consumption records loaded eagerly.
#[async_trait]
pub trait UserRepository: Repository<User> {
    async fn get_all_with_consumption(&self) -> RepoResult<Vec<User>>;

    async fn get_by_id_with_consumption(&self, id: i32) -> RepoResult<Option<User>>;
}
