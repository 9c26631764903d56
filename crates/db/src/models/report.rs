//! Sales report model and filters.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use voskhod_core::report::{ReportPeriod, ReportSort};
use voskhod_core::types::{DbId, Timestamp};

/// A row from `sales_reports` joined with the shift's operator.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SalesReport {
    pub id: DbId,
    pub shift_id: DbId,
    pub operator_id: DbId,
    pub operator_username: String,
    pub report_date: NaiveDate,
    pub total_adult_quantity: i64,
    pub total_child_quantity: i64,
    #[serde(serialize_with = "voskhod_core::money::serialize")]
    pub total_amount: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Sum of an operator's reports over one month.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MonthlyTotals {
    pub operator_id: DbId,
    pub total_adult_quantity: i64,
    pub total_child_quantity: i64,
    #[serde(serialize_with = "voskhod_core::money::serialize")]
    pub total_amount: Decimal,
}

/// Parsed report listing filters.
#[derive(Debug, Clone)]
pub struct ReportFilter {
    pub period: ReportPeriod,
    pub shift_id: Option<DbId>,
    pub operator_id: Option<DbId>,
    pub sort: ReportSort,
}
