//! Repository for the `prices` table.

use sqlx::PgPool;
use voskhod_core::types::DbId;

use crate::models::price::{Price, SavePrice};

const COLUMNS: &str = "id, amount, created_at, updated_at";

/// Provides CRUD operations for prices.
pub struct PriceRepo;

impl PriceRepo {
    pub async fn create(pool: &PgPool, input: &SavePrice) -> Result<Price, sqlx::Error> {
        let query = format!("INSERT INTO prices (amount) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Price>(&query)
            .bind(input.amount)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Price>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prices WHERE id = $1");
        sqlx::query_as::<_, Price>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all prices, cheapest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Price>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prices ORDER BY amount");
        sqlx::query_as::<_, Price>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SavePrice,
    ) -> Result<Option<Price>, sqlx::Error> {
        let query = format!("UPDATE prices SET amount = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Price>(&query)
            .bind(id)
            .bind(input.amount)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM prices WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
