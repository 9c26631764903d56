//! Handlers for the `/ships` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use voskhod_core::error::CoreError;
use voskhod_core::types::DbId;
use voskhod_db::models::ship::{CreateShip, Ship, UpdateShip};
use voskhod_db::repositories::ShipRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

fn validate_seat_limit(seat_limit: Option<i32>) -> AppResult<()> {
    match seat_limit {
        Some(limit) if limit <= 0 => Err(AppError::Core(CoreError::Validation(
            "Seat limit must be positive: no seats on this vessel".into(),
        ))),
        _ => Ok(()),
    }
}

fn validate_name(name: Option<&str>) -> AppResult<()> {
    match name {
        Some(name) if name.trim().is_empty() => Err(AppError::Core(CoreError::Validation(
            "Ship name must not be empty".into(),
        ))),
        _ => Ok(()),
    }
}

/// POST /api/v1/ships
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateShip>,
) -> AppResult<(StatusCode, Json<DataResponse<Ship>>)> {
    validate_name(Some(&input.name))?;
    validate_seat_limit(input.seat_limit)?;
    let ship = ShipRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: ship })))
}

/// GET /api/v1/ships
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<Ship>>>> {
    let ships = ShipRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: ships }))
}

/// GET /api/v1/ships/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Ship>>> {
    let ship = ShipRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Ship", id }))?;
    Ok(Json(DataResponse { data: ship }))
}

/// PUT /api/v1/ships/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateShip>,
) -> AppResult<Json<DataResponse<Ship>>> {
    validate_name(input.name.as_deref())?;
    validate_seat_limit(input.seat_limit)?;
    let ship = ShipRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Ship", id }))?;
    Ok(Json(DataResponse { data: ship }))
}

/// DELETE /api/v1/ships/{id}
///
/// Removes the ship's schedules too; fails with 409 once tickets were sold
/// for any of them.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ShipRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Ship", id }))
    }
}
