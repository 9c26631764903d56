//! Handlers for the `/reports` resource (sales reports, administration only).

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use voskhod_core::error::CoreError;
use voskhod_core::report::{ReportPeriod, ReportSort};
use voskhod_core::types::DbId;
use voskhod_db::models::report::{MonthlyTotals, ReportFilter, SalesReport};
use voskhod_db::repositories::ReportRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportListParams {
    pub date: Option<NaiveDate>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub shift_id: Option<DbId>,
    pub operator_id: Option<DbId>,
    /// `amount_asc` or `amount_desc`; newest first when absent.
    pub sort: Option<String>,
}

impl ReportListParams {
    fn into_filter(self) -> Result<ReportFilter, CoreError> {
        Ok(ReportFilter {
            period: ReportPeriod::from_params(self.date, self.month, self.year)?,
            shift_id: self.shift_id,
            operator_id: self.operator_id,
            sort: match self.sort.as_deref() {
                Some(sort) => sort.parse()?,
                None => ReportSort::default(),
            },
        })
    }
}

/// A report row, with its operator's month totals on monthly listings.
#[derive(Debug, Serialize)]
pub struct ReportRow {
    #[serde(flatten)]
    pub report: SalesReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_totals: Option<MonthlyTotals>,
}

/// GET /api/v1/reports
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ReportListParams>,
) -> AppResult<Json<DataResponse<Vec<ReportRow>>>> {
    let filter = params.into_filter()?;
    let reports = ReportRepo::list(&state.pool, &filter).await?;

    let monthly = match filter.period.month_with_year() {
        Some((year, month)) => ReportRepo::monthly_totals(&state.pool, year, month).await?,
        None => Vec::new(),
    };

    let rows = reports
        .into_iter()
        .map(|report| {
            let monthly_totals = monthly
                .iter()
                .find(|m| m.operator_id == report.operator_id)
                .cloned();
            ReportRow {
                report,
                monthly_totals,
            }
        })
        .collect();
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/reports/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SalesReport>>> {
    let report = ReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SalesReport",
            id,
        }))?;
    Ok(Json(DataResponse { data: report }))
}
