//! Handlers for the `/berths` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use voskhod_core::error::CoreError;
use voskhod_core::types::DbId;
use voskhod_db::models::berth::{Berth, SaveBerth};
use voskhod_db::repositories::BerthRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

fn validate(input: &SaveBerth) -> AppResult<()> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Berth name must not be empty".into(),
        )));
    }
    Ok(())
}

/// POST /api/v1/berths
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<SaveBerth>,
) -> AppResult<(StatusCode, Json<DataResponse<Berth>>)> {
    validate(&input)?;
    let berth = BerthRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: berth })))
}

/// GET /api/v1/berths
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<Berth>>>> {
    let berths = BerthRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: berths }))
}

/// GET /api/v1/berths/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Berth>>> {
    let berth = BerthRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Berth", id }))?;
    Ok(Json(DataResponse { data: berth }))
}

/// PUT /api/v1/berths/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SaveBerth>,
) -> AppResult<Json<DataResponse<Berth>>> {
    validate(&input)?;
    let berth = BerthRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Berth", id }))?;
    Ok(Json(DataResponse { data: berth }))
}

/// DELETE /api/v1/berths/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if BerthRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Berth", id }))
    }
}
