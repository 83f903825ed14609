//! Store traits the HTTP layer depends on.
//!
//! Each entity gets one narrow trait. Implementations resolve comment
//! authors themselves, so every [`Dish`] handed back already carries full
//! [`CommentAuthor`](crate::models::dish::CommentAuthor) records.
//!
//! Lookups by id return `Ok(None)` when the row does not exist; callers
//! decide whether that is a 404. Writes against a parent dish return
//! `Ok(None)` if the dish vanished between the read and the write.

use async_trait::async_trait;

use crate::models::dish::{CreateDish, Dish, NewComment, UpdateComment, UpdateDish};
use crate::models::promotion::{CreatePromotion, Promotion, UpdatePromotion};
use crate::models::user::{NewUser, User};
use crate::models::DeleteSummary;
use crate::types::DbId;

/// Failure reported by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("Duplicate value violates unique constraint: {0}")]
    Conflict(String),

    /// A check, not-null or foreign key constraint rejected the write.
    #[error("Constraint violated: {0}")]
    Constraint(String),

    /// Anything else the backend reported.
    #[error("Store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait DishStore: Send + Sync {
    /// All dishes, ordered by id.
    async fn list(&self) -> StoreResult<Vec<Dish>>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Dish>>;

    async fn create(&self, input: &CreateDish) -> StoreResult<Dish>;

    async fn update(&self, id: DbId, input: &UpdateDish) -> StoreResult<Option<Dish>>;

    /// Remove a dish and its comments, returning the removed document.
    async fn delete(&self, id: DbId) -> StoreResult<Option<Dish>>;

    async fn delete_all(&self) -> StoreResult<DeleteSummary>;

    /// Append a comment to the dish and return the updated dish.
    async fn add_comment(&self, dish_id: DbId, input: &NewComment) -> StoreResult<Option<Dish>>;

    async fn update_comment(
        &self,
        dish_id: DbId,
        comment_id: DbId,
        input: &UpdateComment,
    ) -> StoreResult<Option<Dish>>;

    async fn delete_comment(&self, dish_id: DbId, comment_id: DbId) -> StoreResult<Option<Dish>>;

    /// Remove every comment of the dish, keeping the dish itself.
    async fn clear_comments(&self, dish_id: DbId) -> StoreResult<Option<Dish>>;
}

#[async_trait]
pub trait PromotionStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Promotion>>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Promotion>>;

    async fn create(&self, input: &CreatePromotion) -> StoreResult<Promotion>;

    async fn update(&self, id: DbId, input: &UpdatePromotion) -> StoreResult<Option<Promotion>>;

    async fn delete(&self, id: DbId) -> StoreResult<Option<Promotion>>;

    async fn delete_all(&self) -> StoreResult<DeleteSummary>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, input: &NewUser) -> StoreResult<User>;

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    async fn list(&self) -> StoreResult<Vec<User>>;
}
