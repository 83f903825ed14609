//! Repository for the `dishes` and `dish_comments` tables.
//!
//! Comment authors are resolved with a join against `users` whenever a
//! dish is loaded, so callers always see complete author records.

use std::collections::HashMap;

use async_trait::async_trait;
use bistro_core::models::dish::{
    Comment, CommentAuthor, CreateDish, Dish, NewComment, UpdateComment, UpdateDish,
};
use bistro_core::models::DeleteSummary;
use bistro_core::store::{DishStore, StoreResult};
use bistro_core::types::{DbId, Timestamp};
use sqlx::{FromRow, PgConnection, PgPool};

use crate::error::classify;

/// Column list shared across dish queries.
const COLUMNS: &str =
    "id, name, description, image, category, label, price, featured, created_at, updated_at";

/// Comments for a set of dishes, joined with their authors, oldest first.
const COMMENTS_WITH_AUTHORS: &str = "\
    SELECT c.id, c.dish_id, c.rating, c.comment, c.created_at, c.updated_at, \
           u.id AS author_id, u.username AS author_username, \
           u.firstname AS author_firstname, u.lastname AS author_lastname \
    FROM dish_comments c \
    JOIN users u ON u.id = c.author_id \
    WHERE c.dish_id = ANY($1) \
    ORDER BY c.created_at, c.id";

#[derive(Debug, FromRow)]
struct DishRow {
    id: DbId,
    name: String,
    description: String,
    image: String,
    category: String,
    label: String,
    price: i64,
    featured: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl DishRow {
    fn into_dish(self, comments: Vec<Comment>) -> Dish {
        Dish {
            id: self.id,
            name: self.name,
            description: self.description,
            image: self.image,
            category: self.category,
            label: self.label,
            price: self.price,
            featured: self.featured,
            comments,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct CommentRow {
    id: DbId,
    dish_id: DbId,
    rating: i32,
    comment: String,
    created_at: Timestamp,
    updated_at: Timestamp,
    author_id: DbId,
    author_username: String,
    author_firstname: String,
    author_lastname: String,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            rating: row.rating,
            comment: row.comment,
            author: CommentAuthor {
                id: row.author_id,
                username: row.author_username,
                firstname: row.author_firstname,
                lastname: row.author_lastname,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Provides CRUD operations for dishes and their comments.
pub struct DishRepo;

impl DishRepo {
    /// List all dishes ordered by id, with comments and authors.
    pub async fn list(pool: &PgPool) -> Result<Vec<Dish>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dishes ORDER BY id");
        let rows = sqlx::query_as::<_, DishRow>(&query).fetch_all(pool).await?;
        Self::attach_comments(pool, rows).await
    }

    /// Find a dish by id, with comments and authors.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dish>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dishes WHERE id = $1");
        let row = sqlx::query_as::<_, DishRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Ok(Self::attach_comments(pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Insert a new dish. A fresh dish never has comments.
    pub async fn create(pool: &PgPool, input: &CreateDish) -> Result<Dish, sqlx::Error> {
        let query = format!(
            "INSERT INTO dishes (name, description, image, category, label, price, featured)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, DishRow>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.image)
            .bind(&input.category)
            .bind(&input.label)
            .bind(input.price)
            .bind(input.featured)
            .fetch_one(pool)
            .await?;
        Ok(row.into_dish(Vec::new()))
    }

    /// Update a dish. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDish,
    ) -> Result<Option<Dish>, sqlx::Error> {
        let query = format!(
            "UPDATE dishes SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                image = COALESCE($4, image),
                category = COALESCE($5, category),
                label = COALESCE($6, label),
                price = COALESCE($7, price),
                featured = COALESCE($8, featured),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, DishRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.image)
            .bind(&input.category)
            .bind(&input.label)
            .bind(input.price)
            .bind(input.featured)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Ok(Self::attach_comments(pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Delete a dish (comments cascade) and return it as it was.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Dish>, sqlx::Error> {
        let Some(dish) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let result = sqlx::query("DELETE FROM dishes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok((result.rows_affected() > 0).then_some(dish))
    }

    /// Delete every dish. Returns the number of dishes removed.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dishes").execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Append a comment and return the reloaded dish.
    pub async fn add_comment(
        pool: &PgPool,
        dish_id: DbId,
        input: &NewComment,
    ) -> Result<Option<Dish>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        if !Self::touch(&mut tx, dish_id).await? {
            return Ok(None);
        }
        sqlx::query(
            "INSERT INTO dish_comments (dish_id, author_id, rating, comment)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(dish_id)
        .bind(input.author_id)
        .bind(input.rating)
        .bind(&input.comment)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Self::find_by_id(pool, dish_id).await
    }

    /// Overwrite the present fields of one comment and return the reloaded dish.
    pub async fn update_comment(
        pool: &PgPool,
        dish_id: DbId,
        comment_id: DbId,
        input: &UpdateComment,
    ) -> Result<Option<Dish>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        if !Self::touch(&mut tx, dish_id).await? {
            return Ok(None);
        }
        sqlx::query(
            "UPDATE dish_comments SET
                rating = COALESCE($3, rating),
                comment = COALESCE($4, comment),
                updated_at = NOW()
             WHERE id = $1 AND dish_id = $2",
        )
        .bind(comment_id)
        .bind(dish_id)
        .bind(input.rating)
        .bind(&input.comment)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Self::find_by_id(pool, dish_id).await
    }

    /// Remove one comment and return the reloaded dish.
    pub async fn delete_comment(
        pool: &PgPool,
        dish_id: DbId,
        comment_id: DbId,
    ) -> Result<Option<Dish>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        if !Self::touch(&mut tx, dish_id).await? {
            return Ok(None);
        }
        sqlx::query("DELETE FROM dish_comments WHERE id = $1 AND dish_id = $2")
            .bind(comment_id)
            .bind(dish_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Self::find_by_id(pool, dish_id).await
    }

    /// Remove all comments of a dish and return the reloaded dish.
    pub async fn clear_comments(pool: &PgPool, dish_id: DbId) -> Result<Option<Dish>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        if !Self::touch(&mut tx, dish_id).await? {
            return Ok(None);
        }
        let removed = sqlx::query("DELETE FROM dish_comments WHERE dish_id = $1")
            .bind(dish_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;
        tracing::debug!(dish_id, removed, "Cleared dish comments");
        Self::find_by_id(pool, dish_id).await
    }

    /// Bump the dish's `updated_at`. Returns `false` if the dish is gone.
    async fn touch(conn: &mut PgConnection, dish_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE dishes SET updated_at = NOW() WHERE id = $1")
            .bind(dish_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn attach_comments(pool: &PgPool, rows: Vec<DishRow>) -> Result<Vec<Dish>, sqlx::Error> {
        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let mut by_dish: HashMap<DbId, Vec<Comment>> = HashMap::new();
        if !ids.is_empty() {
            let comments = sqlx::query_as::<_, CommentRow>(COMMENTS_WITH_AUTHORS)
                .bind(&ids)
                .fetch_all(pool)
                .await?;
            for row in comments {
                by_dish.entry(row.dish_id).or_default().push(row.into());
            }
        }
        Ok(rows
            .into_iter()
            .map(|row| {
                let comments = by_dish.remove(&row.id).unwrap_or_default();
                row.into_dish(comments)
            })
            .collect())
    }
}

/// [`DishStore`] backed by Postgres.
#[derive(Clone)]
pub struct PgDishStore {
    pool: PgPool,
}

impl PgDishStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DishStore for PgDishStore {
    async fn list(&self) -> StoreResult<Vec<Dish>> {
        DishRepo::list(&self.pool).await.map_err(classify)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Dish>> {
        DishRepo::find_by_id(&self.pool, id).await.map_err(classify)
    }

    async fn create(&self, input: &CreateDish) -> StoreResult<Dish> {
        DishRepo::create(&self.pool, input).await.map_err(classify)
    }

    async fn update(&self, id: DbId, input: &UpdateDish) -> StoreResult<Option<Dish>> {
        DishRepo::update(&self.pool, id, input)
            .await
            .map_err(classify)
    }

    async fn delete(&self, id: DbId) -> StoreResult<Option<Dish>> {
        DishRepo::delete(&self.pool, id).await.map_err(classify)
    }

    async fn delete_all(&self) -> StoreResult<DeleteSummary> {
        let deleted_count = DishRepo::delete_all(&self.pool).await.map_err(classify)?;
        Ok(DeleteSummary { deleted_count })
    }

    async fn add_comment(&self, dish_id: DbId, input: &NewComment) -> StoreResult<Option<Dish>> {
        DishRepo::add_comment(&self.pool, dish_id, input)
            .await
            .map_err(classify)
    }

    async fn update_comment(
        &self,
        dish_id: DbId,
        comment_id: DbId,
        input: &UpdateComment,
    ) -> StoreResult<Option<Dish>> {
        DishRepo::update_comment(&self.pool, dish_id, comment_id, input)
            .await
            .map_err(classify)
    }

    async fn delete_comment(&self, dish_id: DbId, comment_id: DbId) -> StoreResult<Option<Dish>> {
        DishRepo::delete_comment(&self.pool, dish_id, comment_id)
            .await
            .map_err(classify)
    }

    async fn clear_comments(&self, dish_id: DbId) -> StoreResult<Option<Dish>> {
        DishRepo::clear_comments(&self.pool, dish_id)
            .await
            .map_err(classify)
    }
}
