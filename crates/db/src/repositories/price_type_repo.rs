//! Repository for the `price_types` table.

use sqlx::{PgExecutor, PgPool};
use voskhod_core::types::DbId;

use crate::models::price_type::{CreatePriceType, PriceType, UpdatePriceType};

/// Selected columns, always joined with `prices` for the amount.
const SELECT: &str = "SELECT pt.id, pt.client_category, pt.price_id, p.amount, \
                             pt.created_at, pt.updated_at \
                      FROM price_types pt \
                      JOIN prices p ON p.id = pt.price_id";

/// Provides CRUD operations for price types.
pub struct PriceTypeRepo;

impl PriceTypeRepo {
    pub async fn create(pool: &PgPool, input: &CreatePriceType) -> Result<PriceType, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO price_types (client_category, price_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(input.client_category.as_str())
        .bind(input.price_id)
        .fetch_one(pool)
        .await?;
        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PriceType>, sqlx::Error> {
        let query = format!("{SELECT} WHERE pt.id = $1");
        sqlx::query_as::<_, PriceType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a set of price types, ignoring ids that do not exist.
    pub async fn find_many<'e, E: PgExecutor<'e>>(
        executor: E,
        ids: &[DbId],
    ) -> Result<Vec<PriceType>, sqlx::Error> {
        let query = format!("{SELECT} WHERE pt.id = ANY($1) ORDER BY pt.id");
        sqlx::query_as::<_, PriceType>(&query)
            .bind(ids)
            .fetch_all(executor)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<PriceType>, sqlx::Error> {
        let query = format!("{SELECT} ORDER BY p.amount");
        sqlx::query_as::<_, PriceType>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePriceType,
    ) -> Result<Option<PriceType>, sqlx::Error> {
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE price_types SET
                client_category = COALESCE($2, client_category),
                price_id = COALESCE($3, price_id)
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(input.client_category.map(|c| c.as_str()))
        .bind(input.price_id)
        .fetch_optional(pool)
        .await?;
        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM price_types WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
