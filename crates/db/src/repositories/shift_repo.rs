//! Repository for the `shifts` and `shift_landing_places` tables.

use chrono::NaiveDate;
use sqlx::{PgConnection, PgExecutor};
use voskhod_core::types::DbId;

use crate::models::shift::{Shift, ShiftFilter};

/// Shifts are read with their operator's username and landing places.
const SELECT: &str = "SELECT sh.id, sh.operator_id, o.username AS operator_username, \
                             sh.opened_on, sh.closed_on, sh.status, \
                             ARRAY(SELECT slp.landing_place_id \
                                   FROM shift_landing_places slp \
                                   WHERE slp.shift_id = sh.id \
                                   ORDER BY slp.landing_place_id) AS landing_place_ids, \
                             sh.created_at, sh.updated_at \
                      FROM shifts sh \
                      JOIN operators o ON o.id = sh.operator_id";

/// Provides lifecycle operations for shifts.
pub struct ShiftRepo;

impl ShiftRepo {
    /// Insert an open shift for `opened_on`.
    ///
    /// Fails with a unique violation on `uq_shifts_open_per_day` if the
    /// operator already has an open shift that day.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        operator_id: DbId,
        opened_on: NaiveDate,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO shifts (operator_id, opened_on) VALUES ($1, $2) RETURNING id",
        )
        .bind(operator_id)
        .bind(opened_on)
        .fetch_one(executor)
        .await
    }

    /// Open a shift for `opened_on` unless one is already open.
    ///
    /// Returns the id of the open shift and whether it was created by this
    /// call.
    pub async fn open_if_absent(
        conn: &mut PgConnection,
        operator_id: DbId,
        opened_on: NaiveDate,
    ) -> Result<(DbId, bool), sqlx::Error> {
        let inserted: Option<DbId> = sqlx::query_scalar(
            "INSERT INTO shifts (operator_id, opened_on) VALUES ($1, $2)
             ON CONFLICT (operator_id, opened_on) WHERE status = 'open' DO NOTHING
             RETURNING id",
        )
        .bind(operator_id)
        .bind(opened_on)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(id) = inserted {
            return Ok((id, true));
        }

        let existing: DbId = sqlx::query_scalar(
            "SELECT id FROM shifts
             WHERE operator_id = $1 AND opened_on = $2 AND status = 'open'",
        )
        .bind(operator_id)
        .bind(opened_on)
        .fetch_one(&mut *conn)
        .await?;
        Ok((existing, false))
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Shift>, sqlx::Error> {
        let query = format!("{SELECT} WHERE sh.id = $1");
        sqlx::query_as::<_, Shift>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// The operator's open shift for `day`, if any.
    pub async fn find_open<'e, E: PgExecutor<'e>>(
        executor: E,
        operator_id: DbId,
        day: NaiveDate,
    ) -> Result<Option<Shift>, sqlx::Error> {
        let query = format!(
            "{SELECT} WHERE sh.operator_id = $1 AND sh.opened_on = $2 AND sh.status = 'open'"
        );
        sqlx::query_as::<_, Shift>(&query)
            .bind(operator_id)
            .bind(day)
            .fetch_optional(executor)
            .await
    }

    /// Lock the operator's most recent open shift for the rest of the
    /// transaction. Returns `(id, opened_on, status)`.
    pub async fn lock_latest_open<'e, E: PgExecutor<'e>>(
        executor: E,
        operator_id: DbId,
    ) -> Result<Option<(DbId, NaiveDate, String)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, opened_on, status FROM shifts
             WHERE operator_id = $1 AND status = 'open'
             ORDER BY opened_on DESC, id DESC
             LIMIT 1
             FOR UPDATE",
        )
        .bind(operator_id)
        .fetch_optional(executor)
        .await
    }

    /// Lock a shift row by id. Returns `(operator_id, opened_on, status)`.
    pub async fn lock_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<(DbId, NaiveDate, String)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT operator_id, opened_on, status FROM shifts WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// List shifts, newest first.
    pub async fn list<'e, E: PgExecutor<'e>>(
        executor: E,
        filter: &ShiftFilter,
    ) -> Result<Vec<Shift>, sqlx::Error> {
        let query = format!(
            "{SELECT}
             WHERE ($1::TEXT IS NULL OR sh.status = $1)
               AND ($2::BIGINT IS NULL OR sh.operator_id = $2)
               AND ($3::DATE IS NULL OR sh.opened_on = $3)
             ORDER BY sh.opened_on DESC, sh.id DESC"
        );
        sqlx::query_as::<_, Shift>(&query)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.operator_id)
            .bind(filter.date)
            .fetch_all(executor)
            .await
    }

    /// Archive an open shift. Returns `false` if it was not open.
    pub async fn archive<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        closed_on: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE shifts SET status = 'archived', closed_on = $2
             WHERE id = $1 AND status = 'open'",
        )
        .bind(id)
        .bind(closed_on)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Archive every shift still open from a day before `today`.
    ///
    /// Each one is closed on its own opening date. Returns the archived ids.
    pub async fn archive_stale<'e, E: PgExecutor<'e>>(
        executor: E,
        today: NaiveDate,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE shifts SET status = 'archived', closed_on = opened_on
             WHERE status = 'open' AND opened_on < $1
             RETURNING id",
        )
        .bind(today)
        .fetch_all(executor)
        .await
    }

    /// Replace the set of landing places a shift serves.
    pub async fn set_landing_places(
        conn: &mut PgConnection,
        shift_id: DbId,
        landing_place_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM shift_landing_places WHERE shift_id = $1")
            .bind(shift_id)
            .execute(&mut *conn)
            .await?;

        if landing_place_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO shift_landing_places (shift_id, landing_place_id)
             SELECT $1, UNNEST($2::BIGINT[])
             ON CONFLICT DO NOTHING",
        )
        .bind(shift_id)
        .bind(landing_place_ids)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
