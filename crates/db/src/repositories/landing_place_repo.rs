//! Repository for the `landing_places` table.

use sqlx::PgPool;
use voskhod_core::types::DbId;

use crate::models::landing_place::{CreateLandingPlace, LandingPlace, UpdateLandingPlace};

const COLUMNS: &str = "id, address, currently_working, created_at, updated_at";

pub struct LandingPlaceRepo;

impl LandingPlaceRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateLandingPlace,
    ) -> Result<LandingPlace, sqlx::Error> {
        let query = format!(
            "INSERT INTO landing_places (address, currently_working)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LandingPlace>(&query)
            .bind(&input.address)
            .bind(input.currently_working)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LandingPlace>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM landing_places WHERE id = $1");
        sqlx::query_as::<_, LandingPlace>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// How many of `ids` exist. Used to validate id lists before linking them.
    pub async fn count_existing(pool: &PgPool, ids: &[DbId]) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM landing_places WHERE id = ANY($1)")
            .bind(ids)
            .fetch_one(pool)
            .await
    }

    /// List all landing places ordered by address.
    pub async fn list(pool: &PgPool) -> Result<Vec<LandingPlace>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM landing_places ORDER BY address");
        sqlx::query_as::<_, LandingPlace>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLandingPlace,
    ) -> Result<Option<LandingPlace>, sqlx::Error> {
        let query = format!(
            "UPDATE landing_places SET
                address = COALESCE($2, address),
                currently_working = COALESCE($3, currently_working)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LandingPlace>(&query)
            .bind(id)
            .bind(&input.address)
            .bind(input.currently_working)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM landing_places WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
