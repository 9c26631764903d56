//! Repository for the `ships` table.

use sqlx::PgPool;
use voskhod_core::types::DbId;

use crate::models::ship::{CreateShip, Ship, UpdateShip, DEFAULT_SEAT_LIMIT};

const COLUMNS: &str = "id, name, seat_limit, created_at, updated_at";

/// Provides CRUD operations for ships.
pub struct ShipRepo;

impl ShipRepo {
    pub async fn create(pool: &PgPool, input: &CreateShip) -> Result<Ship, sqlx::Error> {
        let query = format!(
            "INSERT INTO ships (name, seat_limit) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ship>(&query)
            .bind(&input.name)
            .bind(input.seat_limit.unwrap_or(DEFAULT_SEAT_LIMIT))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ship>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ships WHERE id = $1");
        sqlx::query_as::<_, Ship>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all ships ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Ship>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ships ORDER BY name");
        sqlx::query_as::<_, Ship>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateShip,
    ) -> Result<Option<Ship>, sqlx::Error> {
        let query = format!(
            "UPDATE ships SET
                name = COALESCE($2, name),
                seat_limit = COALESCE($3, seat_limit)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ship>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.seat_limit)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ships WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
