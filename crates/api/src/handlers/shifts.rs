//! Handlers for the `/shifts` resource.
//!
//! Cashiers manage their own shift through `/shifts/current`; administrators
//! list shifts and can close any of them.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use voskhod_core::error::CoreError;
use voskhod_core::types::DbId;
use voskhod_db::models::shift::{Shift, ShiftFilter};
use voskhod_db::repositories::ShiftRepo;

use crate::engine::shifts;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireOperator};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct OpenShiftRequest {
    #[serde(default)]
    pub landing_place_ids: Vec<DbId>,
}

#[derive(Debug, Deserialize)]
pub struct LandingPlacesRequest {
    pub landing_place_ids: Vec<DbId>,
}

/// Find the caller's open shift for today or fail with 404.
async fn current_shift(state: &AppState, user: &AuthUser) -> AppResult<Shift> {
    ShiftRepo::find_open(&state.pool, user.operator_id, state.clock.today())
        .await?
        .ok_or_else(|| AppError::NotFound("No shift is open today".into()))
}

/// POST /api/v1/shifts
///
/// Open today's shift. 409 if one is already open.
pub async fn open(
    State(state): State<AppState>,
    RequireOperator(user): RequireOperator,
    body: Option<Json<OpenShiftRequest>>,
) -> AppResult<(StatusCode, Json<DataResponse<Shift>>)> {
    let Json(input) = body.unwrap_or_default();
    let shift = shifts::open(
        &state.pool,
        user.operator_id,
        state.clock.today(),
        &input.landing_place_ids,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: shift })))
}

/// GET /api/v1/shifts/current
pub async fn get_current(
    State(state): State<AppState>,
    RequireOperator(user): RequireOperator,
) -> AppResult<Json<DataResponse<Shift>>> {
    let shift = current_shift(&state, &user).await?;
    Ok(Json(DataResponse { data: shift }))
}

/// PUT /api/v1/shifts/current/landing-places
pub async fn set_current_landing_places(
    State(state): State<AppState>,
    RequireOperator(user): RequireOperator,
    Json(input): Json<LandingPlacesRequest>,
) -> AppResult<Json<DataResponse<Shift>>> {
    let current = current_shift(&state, &user).await?;
    let shift = shifts::set_landing_places(&state.pool, current.id, &input.landing_place_ids).await?;
    Ok(Json(DataResponse { data: shift }))
}

/// POST /api/v1/shifts/current/close
///
/// Close the caller's shift. Their sessions end with it.
pub async fn close_current(
    State(state): State<AppState>,
    RequireOperator(user): RequireOperator,
) -> AppResult<Json<DataResponse<Shift>>> {
    let current = current_shift(&state, &user).await?;
    let shift = shifts::close(&state.pool, current.id, state.clock.today()).await?;
    Ok(Json(DataResponse { data: shift }))
}

/// GET /api/v1/shifts
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(filter): Query<ShiftFilter>,
) -> AppResult<Json<DataResponse<Vec<Shift>>>> {
    let shifts = ShiftRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: shifts }))
}

/// GET /api/v1/shifts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Shift>>> {
    let shift = ShiftRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Shift", id }))?;
    Ok(Json(DataResponse { data: shift }))
}

/// POST /api/v1/shifts/{id}/close
///
/// Close any operator's shift; that operator is logged out.
pub async fn close_by_id(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Shift>>> {
    let shift = shifts::close(&state.pool, id, state.clock.today()).await?;
    tracing::info!(admin_id = admin.operator_id, shift_id = id, "Shift closed by administration");
    Ok(Json(DataResponse { data: shift }))
}
