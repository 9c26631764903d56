//! Shift opening, closing and the nightly sweep.

use chrono::NaiveDate;
use sqlx::PgPool;
use voskhod_core::error::CoreError;
use voskhod_core::shift::{ensure_can_close, ShiftStatus};
use voskhod_core::types::DbId;
use voskhod_db::models::shift::Shift;
use voskhod_db::repositories::{
    LandingPlaceRepo, OperatorRepo, ReportRepo, SessionRepo, ShiftRepo,
};

use crate::error::{AppError, AppResult};

/// What one nightly sweep changed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepOutcome {
    pub archived_shifts: Vec<DbId>,
    pub logged_out: usize,
    pub revoked_sessions: u64,
}

/// Open a shift for `operator_id` on `today` together with its empty report.
///
/// Fails with 409 if the operator already has an open shift today.
pub async fn open(
    pool: &PgPool,
    operator_id: DbId,
    today: NaiveDate,
    landing_place_ids: &[DbId],
) -> AppResult<Shift> {
    let landing_place_ids = dedup(landing_place_ids);
    ensure_landing_places_exist(pool, &landing_place_ids).await?;

    let mut tx = pool.begin().await?;
    let shift_id = match ShiftRepo::create(&mut *tx, operator_id, today).await {
        Ok(id) => id,
        Err(sqlx::Error::Database(db)) if db.constraint() == Some("uq_shifts_open_per_day") => {
            return Err(AppError::Core(CoreError::Conflict(
                "A shift is already open today".into(),
            )));
        }
        Err(e) => return Err(e.into()),
    };
    ShiftRepo::set_landing_places(&mut tx, shift_id, &landing_place_ids).await?;
    ReportRepo::ensure_for_shift(&mut *tx, shift_id, today).await?;
    tx.commit().await?;

    tracing::info!(operator_id, shift_id, %today, "Shift opened");
    load(pool, shift_id).await
}

/// Open today's shift unless one is already open. Used on login.
pub async fn open_if_absent(pool: &PgPool, operator_id: DbId, today: NaiveDate) -> AppResult<Shift> {
    let mut tx = pool.begin().await?;
    let (shift_id, created) = ShiftRepo::open_if_absent(&mut tx, operator_id, today).await?;
    if created {
        ReportRepo::ensure_for_shift(&mut *tx, shift_id, today).await?;
    }
    tx.commit().await?;

    if created {
        tracing::info!(operator_id, shift_id, %today, "Shift opened on login");
    }
    load(pool, shift_id).await
}

/// Replace the landing places served by an open shift.
pub async fn set_landing_places(
    pool: &PgPool,
    shift_id: DbId,
    landing_place_ids: &[DbId],
) -> AppResult<Shift> {
    let landing_place_ids = dedup(landing_place_ids);
    ensure_landing_places_exist(pool, &landing_place_ids).await?;

    let mut tx = pool.begin().await?;
    let (_, _, status) = ShiftRepo::lock_by_id(&mut *tx, shift_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Shift",
            id: shift_id,
        }))?;
    if status.parse::<ShiftStatus>()? != ShiftStatus::Open {
        return Err(AppError::Core(CoreError::Conflict(
            "Landing places of a closed shift cannot change".into(),
        )));
    }
    ShiftRepo::set_landing_places(&mut tx, shift_id, &landing_place_ids).await?;
    tx.commit().await?;

    load(pool, shift_id).await
}

/// Archive a shift and force-log-out its operator.
///
/// Stamps `closed_on`, revokes all of the operator's sessions and records
/// the logout time.
pub async fn close(pool: &PgPool, shift_id: DbId, closed_on: NaiveDate) -> AppResult<Shift> {
    let mut tx = pool.begin().await?;
    let (operator_id, _, status) = ShiftRepo::lock_by_id(&mut *tx, shift_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Shift",
            id: shift_id,
        }))?;
    ensure_can_close(status.parse()?)?;

    ShiftRepo::archive(&mut *tx, shift_id, closed_on).await?;
    let revoked = SessionRepo::revoke_all_for_operator(&mut *tx, operator_id).await?;
    OperatorRepo::record_logout(&mut *tx, operator_id).await?;
    tx.commit().await?;

    tracing::info!(operator_id, shift_id, %closed_on, revoked, "Shift closed, operator logged out");
    load(pool, shift_id).await
}

/// Archive every shift left open before `today`.
pub async fn archive_stale(pool: &PgPool, today: NaiveDate) -> Result<Vec<DbId>, sqlx::Error> {
    ShiftRepo::archive_stale(pool, today).await
}

/// Archive every shift left open before `today` and log out all staff.
///
/// Administration accounts keep their sessions.
pub async fn sweep(pool: &PgPool, today: NaiveDate) -> Result<SweepOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let archived_shifts = ShiftRepo::archive_stale(&mut *tx, today).await?;
    let staff = OperatorRepo::record_logout_all_staff(&mut *tx).await?;
    let revoked_sessions = SessionRepo::revoke_all_for_operators(&mut *tx, &staff).await?;
    tx.commit().await?;

    Ok(SweepOutcome {
        archived_shifts,
        logged_out: staff.len(),
        revoked_sessions,
    })
}

async fn load(pool: &PgPool, shift_id: DbId) -> AppResult<Shift> {
    ShiftRepo::find_by_id(pool, shift_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Shift",
            id: shift_id,
        }))
}

async fn ensure_landing_places_exist(pool: &PgPool, ids: &[DbId]) -> AppResult<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let found = LandingPlaceRepo::count_existing(pool, ids).await?;
    if found != ids.len() as i64 {
        return Err(AppError::Core(CoreError::Validation(
            "Unknown landing place in landing_place_ids".into(),
        )));
    }
    Ok(())
}

/// Sorted, duplicate-free copy of an id list.
pub(crate) fn dedup(ids: &[DbId]) -> Vec<DbId> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_sorts_and_drops_repeats() {
        assert_eq!(dedup(&[3, 1, 3, 2, 1]), vec![1, 2, 3]);
        assert!(dedup(&[]).is_empty());
    }
}
