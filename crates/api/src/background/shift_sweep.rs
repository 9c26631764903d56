//! Nightly shift sweep.
//!
//! At every business-local midnight, archives shifts still open from the
//! previous day and logs out all non-administration staff. At startup only
//! the archiving runs, so shifts missed during downtime are closed without
//! logging out staff working the current day.

use chrono::Utc;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use voskhod_core::clock::BusinessClock;
use voskhod_db::repositories::SessionRepo;

use crate::engine::shifts;

/// Run the sweep loop until `cancel` is triggered.
pub async fn run(pool: PgPool, clock: BusinessClock, cancel: CancellationToken) {
    tracing::info!(offset = %clock.offset(), "Shift sweep job started");

    match shifts::archive_stale(&pool, clock.today()).await {
        Ok(archived) if !archived.is_empty() => {
            tracing::info!(archived = archived.len(), "Shift sweep: caught up stale shifts");
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!(error = %e, "Shift sweep: startup catch-up failed");
        }
    }

    loop {
        let wait = clock
            .until_next_midnight(Utc::now())
            .to_std()
            .unwrap_or(std::time::Duration::from_secs(60));
        tracing::debug!(wait_secs = wait.as_secs(), "Shift sweep: sleeping until midnight");

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Shift sweep job stopping");
                break;
            }
            _ = tokio::time::sleep(wait) => {
                sweep_once(&pool, &clock).await;
            }
        }
    }
}

async fn sweep_once(pool: &PgPool, clock: &BusinessClock) {
    let today = clock.today();
    match shifts::sweep(pool, today).await {
        Ok(outcome) => {
            if outcome.archived_shifts.is_empty() {
                tracing::debug!(%today, "Shift sweep: no stale shifts");
            } else {
                tracing::info!(
                    %today,
                    archived = outcome.archived_shifts.len(),
                    "Shift sweep: archived stale shifts"
                );
            }
            tracing::info!(
                logged_out = outcome.logged_out,
                revoked_sessions = outcome.revoked_sessions,
                "Shift sweep: staff logged out"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Shift sweep failed");
        }
    }

    match SessionRepo::cleanup_expired(pool).await {
        Ok(deleted) if deleted > 0 => {
            tracing::info!(deleted, "Shift sweep: purged dead sessions");
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!(error = %e, "Shift sweep: session cleanup failed");
        }
    }
}
