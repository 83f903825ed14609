//! Repository for the `promotions` table.

use async_trait::async_trait;
use bistro_core::models::promotion::{CreatePromotion, Promotion, UpdatePromotion};
use bistro_core::models::DeleteSummary;
use bistro_core::store::{PromotionStore, StoreResult};
use bistro_core::types::{DbId, Timestamp};
use sqlx::{FromRow, PgPool};

use crate::error::classify;

const COLUMNS: &str = "id, name, description, image, label, price, featured, created_at, updated_at";

#[derive(Debug, FromRow)]
struct PromotionRow {
    id: DbId,
    name: String,
    description: String,
    image: String,
    label: String,
    price: i64,
    featured: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl From<PromotionRow> for Promotion {
    fn from(row: PromotionRow) -> Self {
        Promotion {
            id: row.id,
            name: row.name,
            description: row.description,
            image: row.image,
            label: row.label,
            price: row.price,
            featured: row.featured,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Provides CRUD operations for promotions.
pub struct PromotionRepo;

impl PromotionRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Promotion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM promotions ORDER BY id");
        let rows = sqlx::query_as::<_, PromotionRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Promotion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM promotions WHERE id = $1");
        let row = sqlx::query_as::<_, PromotionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    pub async fn create(pool: &PgPool, input: &CreatePromotion) -> Result<Promotion, sqlx::Error> {
        let query = format!(
            "INSERT INTO promotions (name, description, image, label, price, featured)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PromotionRow>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.image)
            .bind(&input.label)
            .bind(input.price)
            .bind(input.featured)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Update a promotion. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePromotion,
    ) -> Result<Option<Promotion>, sqlx::Error> {
        let query = format!(
            "UPDATE promotions SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                image = COALESCE($4, image),
                label = COALESCE($5, label),
                price = COALESCE($6, price),
                featured = COALESCE($7, featured),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PromotionRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.image)
            .bind(&input.label)
            .bind(input.price)
            .bind(input.featured)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Delete a promotion, returning the removed row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Promotion>, sqlx::Error> {
        let query = format!("DELETE FROM promotions WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, PromotionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM promotions").execute(pool).await?;
        Ok(result.rows_affected())
    }
}

/// [`PromotionStore`] backed by Postgres.
#[derive(Clone)]
pub struct PgPromotionStore {
    pool: PgPool,
}

impl PgPromotionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromotionStore for PgPromotionStore {
    async fn list(&self) -> StoreResult<Vec<Promotion>> {
        PromotionRepo::list(&self.pool).await.map_err(classify)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Promotion>> {
        PromotionRepo::find_by_id(&self.pool, id)
            .await
            .map_err(classify)
    }

    async fn create(&self, input: &CreatePromotion) -> StoreResult<Promotion> {
        PromotionRepo::create(&self.pool, input)
            .await
            .map_err(classify)
    }

    async fn update(&self, id: DbId, input: &UpdatePromotion) -> StoreResult<Option<Promotion>> {
        PromotionRepo::update(&self.pool, id, input)
            .await
            .map_err(classify)
    }

    async fn delete(&self, id: DbId) -> StoreResult<Option<Promotion>> {
        PromotionRepo::delete(&self.pool, id).await.map_err(classify)
    }

    async fn delete_all(&self) -> StoreResult<DeleteSummary> {
        let deleted_count = PromotionRepo::delete_all(&self.pool)
            .await
            .map_err(classify)?;
        Ok(DeleteSummary { deleted_count })
    }
}
