//! Handlers for the `/prices` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use voskhod_core::error::CoreError;
use voskhod_core::pricing::validate_amount;
use voskhod_core::types::DbId;
use voskhod_db::models::price::{Price, SavePrice};
use voskhod_db::repositories::PriceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/prices
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<SavePrice>,
) -> AppResult<(StatusCode, Json<DataResponse<Price>>)> {
    validate_amount(input.amount)?;
    let price = PriceRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: price })))
}

/// GET /api/v1/prices
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<Price>>>> {
    let prices = PriceRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: prices }))
}

/// GET /api/v1/prices/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Price>>> {
    let price = PriceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Price", id }))?;
    Ok(Json(DataResponse { data: price }))
}

/// PUT /api/v1/prices/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SavePrice>,
) -> AppResult<Json<DataResponse<Price>>> {
    validate_amount(input.amount)?;
    let price = PriceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Price", id }))?;
    Ok(Json(DataResponse { data: price }))
}

/// DELETE /api/v1/prices/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PriceRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Price", id }))
    }
}
