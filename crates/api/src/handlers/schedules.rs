//! Handlers for the `/schedules` resource (ship departures).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveTime;
use serde::Deserialize;
use voskhod_core::error::CoreError;
use voskhod_core::types::DbId;
use voskhod_db::models::schedule::{CreateSchedule, Schedule, UpdateSchedule};
use voskhod_db::repositories::ScheduleRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScheduleListParams {
    pub ship_id: Option<DbId>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Schedule",
        id,
    })
}

fn validate_times(start_time: NaiveTime, end_time: NaiveTime) -> AppResult<()> {
    if end_time <= start_time {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Arrival {end_time} must be after departure {start_time}"
        ))));
    }
    Ok(())
}

/// POST /api/v1/schedules
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateSchedule>,
) -> AppResult<(StatusCode, Json<DataResponse<Schedule>>)> {
    validate_times(input.start_time, input.end_time)?;
    let schedule = ScheduleRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: schedule })))
}

/// GET /api/v1/schedules
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<ScheduleListParams>,
) -> AppResult<Json<DataResponse<Vec<Schedule>>>> {
    let schedules = ScheduleRepo::list(&state.pool, params.ship_id).await?;
    Ok(Json(DataResponse { data: schedules }))
}

/// GET /api/v1/schedules/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Schedule>>> {
    let schedule = ScheduleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: schedule }))
}

/// PUT /api/v1/schedules/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSchedule>,
) -> AppResult<Json<DataResponse<Schedule>>> {
    let current = ScheduleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    validate_times(
        input.start_time.unwrap_or(current.start_time),
        input.end_time.unwrap_or(current.end_time),
    )?;

    let schedule = ScheduleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: schedule }))
}

/// DELETE /api/v1/schedules/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ScheduleRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn arrival_must_follow_departure() {
        assert!(validate_times(t(10, 0), t(11, 30)).is_ok());
        assert!(validate_times(t(10, 0), t(10, 0)).is_err());
        assert!(validate_times(t(12, 0), t(11, 0)).is_err());
    }
}
