//! Handlers for the `/price-types` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use voskhod_core::error::CoreError;
use voskhod_core::types::DbId;
use voskhod_db::models::price_type::{CreatePriceType, PriceType, UpdatePriceType};
use voskhod_db::repositories::PriceTypeRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/price-types
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreatePriceType>,
) -> AppResult<(StatusCode, Json<DataResponse<PriceType>>)> {
    let price_type = PriceTypeRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: price_type })))
}

/// GET /api/v1/price-types
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<PriceType>>>> {
    let price_types = PriceTypeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: price_types }))
}

/// GET /api/v1/price-types/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PriceType>>> {
    let price_type = PriceTypeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PriceType",
            id,
        }))?;
    Ok(Json(DataResponse { data: price_type }))
}

/// PUT /api/v1/price-types/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePriceType>,
) -> AppResult<Json<DataResponse<PriceType>>> {
    let price_type = PriceTypeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PriceType",
            id,
        }))?;
    Ok(Json(DataResponse { data: price_type }))
}

/// DELETE /api/v1/price-types/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PriceTypeRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "PriceType",
            id,
        }))
    }
}
