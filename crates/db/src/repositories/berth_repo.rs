//! Repository for the `berths` table.

use sqlx::PgPool;
use voskhod_core::types::DbId;

use crate::models::berth::{Berth, SaveBerth};

const COLUMNS: &str = "id, name, created_at, updated_at";

pub struct BerthRepo;

impl BerthRepo {
    pub async fn create(pool: &PgPool, input: &SaveBerth) -> Result<Berth, sqlx::Error> {
        let query = format!("INSERT INTO berths (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Berth>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Berth>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM berths WHERE id = $1");
        sqlx::query_as::<_, Berth>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Berth>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM berths ORDER BY name");
        sqlx::query_as::<_, Berth>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SaveBerth,
    ) -> Result<Option<Berth>, sqlx::Error> {
        let query = format!("UPDATE berths SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Berth>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM berths WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
