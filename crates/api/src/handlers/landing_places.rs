//! Handlers for the `/landing-places` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use voskhod_core::error::CoreError;
use voskhod_core::types::DbId;
use voskhod_db::models::landing_place::{CreateLandingPlace, LandingPlace, UpdateLandingPlace};
use voskhod_db::repositories::LandingPlaceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "LandingPlace",
        id,
    })
}

/// POST /api/v1/landing-places
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateLandingPlace>,
) -> AppResult<(StatusCode, Json<DataResponse<LandingPlace>>)> {
    if input.address.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Address must not be empty".into(),
        )));
    }
    let place = LandingPlaceRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: place })))
}

/// GET /api/v1/landing-places
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<LandingPlace>>>> {
    let places = LandingPlaceRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: places }))
}

/// GET /api/v1/landing-places/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LandingPlace>>> {
    let place = LandingPlaceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: place }))
}

/// PUT /api/v1/landing-places/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLandingPlace>,
) -> AppResult<Json<DataResponse<LandingPlace>>> {
    let place = LandingPlaceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: place }))
}

/// DELETE /api/v1/landing-places/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if LandingPlaceRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
