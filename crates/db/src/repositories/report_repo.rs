//! Repository for the `sales_reports` table.

use chrono::NaiveDate;
use sqlx::{PgExecutor, PgPool};
use voskhod_core::report::{ReportPeriod, SalesTotals};
use voskhod_core::types::DbId;

use crate::models::report::{MonthlyTotals, ReportFilter, SalesReport};

const SELECT: &str = "SELECT r.id, r.shift_id, sh.operator_id, o.username AS operator_username, \
                             r.report_date, r.total_adult_quantity, r.total_child_quantity, \
                             r.total_amount, r.created_at, r.updated_at \
                      FROM sales_reports r \
                      JOIN shifts sh ON sh.id = r.shift_id \
                      JOIN operators o ON o.id = sh.operator_id";

/// Provides persistence for per-shift sales reports.
pub struct ReportRepo;

impl ReportRepo {
    /// Create an empty report for a shift's day if it does not exist yet.
    pub async fn ensure_for_shift<'e, E: PgExecutor<'e>>(
        executor: E,
        shift_id: DbId,
        report_date: NaiveDate,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO sales_reports (shift_id, report_date) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_sales_reports_shift_date DO NOTHING",
        )
        .bind(shift_id)
        .bind(report_date)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Overwrite a shift's report for `report_date` with fresh totals.
    pub async fn upsert_totals<'e, E: PgExecutor<'e>>(
        executor: E,
        shift_id: DbId,
        report_date: NaiveDate,
        totals: &SalesTotals,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO sales_reports
                (shift_id, report_date, total_adult_quantity, total_child_quantity, total_amount)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT uq_sales_reports_shift_date DO UPDATE SET
                total_adult_quantity = EXCLUDED.total_adult_quantity,
                total_child_quantity = EXCLUDED.total_child_quantity,
                total_amount = EXCLUDED.total_amount",
        )
        .bind(shift_id)
        .bind(report_date)
        .bind(totals.total_adult_quantity)
        .bind(totals.total_child_quantity)
        .bind(totals.total_amount)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SalesReport>, sqlx::Error> {
        let query = format!("{SELECT} WHERE r.id = $1");
        sqlx::query_as::<_, SalesReport>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List reports matching `filter`.
    ///
    /// Period parameters are bound as nullable values: `$1` exact date,
    /// `$2` month, `$3` year.
    pub async fn list(pool: &PgPool, filter: &ReportFilter) -> Result<Vec<SalesReport>, sqlx::Error> {
        let (date, month, year) = period_params(&filter.period);
        let query = format!(
            "{SELECT}
             WHERE ($1::DATE IS NULL OR r.report_date = $1)
               AND ($2::INT IS NULL OR EXTRACT(MONTH FROM r.report_date)::INT = $2)
               AND ($3::INT IS NULL OR EXTRACT(YEAR FROM r.report_date)::INT = $3)
               AND ($4::BIGINT IS NULL OR r.shift_id = $4)
               AND ($5::BIGINT IS NULL OR sh.operator_id = $5)
             ORDER BY {}",
            prefixed_order(filter.sort.order_by())
        );
        sqlx::query_as::<_, SalesReport>(&query)
            .bind(date)
            .bind(month)
            .bind(year)
            .bind(filter.shift_id)
            .bind(filter.operator_id)
            .fetch_all(pool)
            .await
    }

    /// Per-operator sums of every report in one calendar month.
    pub async fn monthly_totals(
        pool: &PgPool,
        year: i32,
        month: u32,
    ) -> Result<Vec<MonthlyTotals>, sqlx::Error> {
        sqlx::query_as::<_, MonthlyTotals>(
            "SELECT sh.operator_id,
                    COALESCE(SUM(r.total_adult_quantity), 0)::BIGINT AS total_adult_quantity,
                    COALESCE(SUM(r.total_child_quantity), 0)::BIGINT AS total_child_quantity,
                    COALESCE(SUM(r.total_amount), 0) AS total_amount
             FROM sales_reports r
             JOIN shifts sh ON sh.id = r.shift_id
             WHERE EXTRACT(YEAR FROM r.report_date)::INT = $1
               AND EXTRACT(MONTH FROM r.report_date)::INT = $2
             GROUP BY sh.operator_id
             ORDER BY sh.operator_id",
        )
        .bind(year)
        .bind(month as i32)
        .fetch_all(pool)
        .await
    }
}

fn period_params(period: &ReportPeriod) -> (Option<NaiveDate>, Option<i32>, Option<i32>) {
    match *period {
        ReportPeriod::All => (None, None, None),
        ReportPeriod::Day(date) => (Some(date), None, None),
        ReportPeriod::Month { year, month } => (None, Some(month as i32), Some(year)),
        ReportPeriod::MonthOfAnyYear(month) => (None, Some(month as i32), None),
        ReportPeriod::Year(year) => (None, None, Some(year)),
    }
}

/// Qualify the bare sort columns with the report table alias.
fn prefixed_order(order_by: &str) -> String {
    order_by
        .split(", ")
        .map(|part| format!("r.{part}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use voskhod_core::report::ReportSort;

    #[test]
    fn order_columns_are_qualified() {
        assert_eq!(
            prefixed_order(ReportSort::AmountAsc.order_by()),
            "r.total_amount ASC, r.id ASC"
        );
    }

    #[test]
    fn month_period_binds_month_and_year() {
        let (date, month, year) = period_params(&ReportPeriod::Month { year: 2026, month: 7 });
        assert_eq!((date, month, year), (None, Some(7), Some(2026)));
    }
}
