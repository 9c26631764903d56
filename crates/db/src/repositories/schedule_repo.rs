//! Repository for the `ship_schedules` table.

use sqlx::{PgExecutor, PgPool};
use voskhod_core::types::DbId;

use crate::models::schedule::{CreateSchedule, Schedule, UpdateSchedule};

/// Schedules are always read together with their ship and berth.
const SELECT: &str = "SELECT sc.id, sc.ship_id, s.name AS ship_name, s.seat_limit, \
                             sc.berth_id, b.name AS berth_name, \
                             sc.start_time, sc.end_time, sc.created_at, sc.updated_at \
                      FROM ship_schedules sc \
                      JOIN ships s ON s.id = sc.ship_id \
                      LEFT JOIN berths b ON b.id = sc.berth_id";

/// Provides CRUD operations for ship schedules.
pub struct ScheduleRepo;

impl ScheduleRepo {
    pub async fn create(pool: &PgPool, input: &CreateSchedule) -> Result<Schedule, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO ship_schedules (ship_id, berth_id, start_time, end_time)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(input.ship_id)
        .bind(input.berth_id)
        .bind(input.start_time)
        .bind(input.end_time)
        .fetch_one(pool)
        .await?;
        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Schedule>, sqlx::Error> {
        let query = format!("{SELECT} WHERE sc.id = $1");
        sqlx::query_as::<_, Schedule>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Lock the schedule row for the rest of the transaction.
    ///
    /// Serializes seat-limit checks for the same departure.
    pub async fn lock<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        let row: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM ship_schedules WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(row.is_some())
    }

    /// List schedules, optionally for one ship, in departure order.
    pub async fn list(pool: &PgPool, ship_id: Option<DbId>) -> Result<Vec<Schedule>, sqlx::Error> {
        let query = format!(
            "{SELECT} WHERE ($1::BIGINT IS NULL OR sc.ship_id = $1) \
             ORDER BY sc.start_time, s.name"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(ship_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSchedule,
    ) -> Result<Option<Schedule>, sqlx::Error> {
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE ship_schedules SET
                ship_id = COALESCE($2, ship_id),
                berth_id = COALESCE($3, berth_id),
                start_time = COALESCE($4, start_time),
                end_time = COALESCE($5, end_time)
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(input.ship_id)
        .bind(input.berth_id)
        .bind(input.start_time)
        .bind(input.end_time)
        .fetch_optional(pool)
        .await?;
        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ship_schedules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
