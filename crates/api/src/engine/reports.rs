//! Sales report recomputation.

use chrono::NaiveDate;
use sqlx::PgConnection;
use voskhod_core::money::ensure_storable;
use voskhod_core::report::{aggregate, SalesTotals, TicketLine};
use voskhod_core::types::DbId;
use voskhod_db::repositories::{ReportRepo, TicketRepo};

use crate::error::AppResult;

/// Rebuild a shift's report for `report_date` from all of its tickets.
///
/// The caller must hold the shift row lock. Fails with a validation error
/// when the shift's total no longer fits the report column.
pub async fn recompute_for_shift(
    conn: &mut PgConnection,
    shift_id: DbId,
    report_date: NaiveDate,
) -> AppResult<SalesTotals> {
    let lines: Vec<TicketLine> = TicketRepo::lines_for_shift(&mut *conn, shift_id)
        .await?
        .into_iter()
        .map(TicketLine::from)
        .collect();
    let totals = aggregate(&lines);
    ensure_storable(totals.total_amount, "Shift sales total")?;
    ReportRepo::upsert_totals(&mut *conn, shift_id, report_date, &totals).await?;

    tracing::debug!(
        shift_id,
        %report_date,
        total_amount = %totals.total_amount,
        "Sales report recomputed"
    );
    Ok(totals)
}
