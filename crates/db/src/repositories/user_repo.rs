//! Repository for the `users` table.

use async_trait::async_trait;
use bistro_core::models::user::{NewUser, User};
use bistro_core::store::{StoreResult, UserStore};
use bistro_core::types::{DbId, Timestamp};
use sqlx::{FromRow, PgPool};

use crate::error::classify;

const COLUMNS: &str = "id, username, firstname, lastname, admin, password_hash, created_at";

#[derive(Debug, FromRow)]
struct UserRow {
    id: DbId,
    username: String,
    firstname: String,
    lastname: String,
    admin: bool,
    password_hash: String,
    created_at: Timestamp,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            firstname: row.firstname,
            lastname: row.lastname,
            admin: row.admin,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

pub struct UserRepo;

impl UserRepo {
    pub async fn create(pool: &PgPool, input: &NewUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash, firstname, lastname, admin)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.firstname)
            .bind(&input.lastname)
            .bind(input.admin)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        let rows = sqlx::query_as::<_, UserRow>(&query).fetch_all(pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// [`UserStore`] backed by Postgres.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, input: &NewUser) -> StoreResult<User> {
        UserRepo::create(&self.pool, input).await.map_err(classify)
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        UserRepo::find_by_username(&self.pool, username)
            .await
            .map_err(classify)
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        UserRepo::list(&self.pool).await.map_err(classify)
    }
}
