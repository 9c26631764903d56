//! Handlers for the `/operators` resource (account management).
//!
//! All handlers require the `administration` role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use voskhod_core::error::CoreError;
use voskhod_core::roles::is_known_role;
use voskhod_core::types::DbId;
use voskhod_db::models::operator::{CreateOperator, OperatorResponse, UpdateOperator};
use voskhod_db::repositories::{OperatorRepo, SessionRepo, TicketRepo};

use crate::auth::password::{hash_password, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOperatorRequest {
    #[validate(length(min = 1, max = 150, message = "must be 1 to 150 characters"))]
    pub username: String,
    pub full_name: Option<String>,
    #[validate(custom(function = "validate_inn"))]
    pub inn: Option<String>,
    pub role: String,
    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "must be at least 8 characters long"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOperatorRequest {
    pub full_name: Option<String>,
    #[validate(custom(function = "validate_inn"))]
    pub inn: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct OperatorListParams {
    pub role: Option<String>,
}

/// Taxpayer number: 10 to 12 digits.
fn validate_inn(inn: &str) -> Result<(), validator::ValidationError> {
    if (10..=12).contains(&inn.len()) && inn.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("inn")
            .with_message("must be 10 to 12 digits".into()))
    }
}

fn ensure_known_role(role: &str) -> AppResult<()> {
    if is_known_role(role) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role '{role}'"
        ))))
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/operators
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateOperatorRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<OperatorResponse>>)> {
    input.validate()?;
    ensure_known_role(&input.role)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let operator = OperatorRepo::create(
        &state.pool,
        &CreateOperator {
            username: input.username,
            full_name: input.full_name,
            inn: input.inn,
            role: input.role,
            password_hash,
        },
    )
    .await?;

    tracing::info!(
        admin_id = admin.operator_id,
        operator_id = operator.id,
        role = %operator.role,
        "Operator account created"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: OperatorResponse::from(&operator),
        }),
    ))
}

/// GET /api/v1/operators
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<OperatorListParams>,
) -> AppResult<Json<DataResponse<Vec<OperatorResponse>>>> {
    if let Some(role) = params.role.as_deref() {
        ensure_known_role(role)?;
    }
    let operators = OperatorRepo::list(&state.pool, params.role.as_deref()).await?;
    Ok(Json(DataResponse {
        data: operators.iter().map(OperatorResponse::from).collect(),
    }))
}

/// GET /api/v1/operators/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<OperatorResponse>>> {
    let operator = OperatorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Operator",
            id,
        }))?;
    Ok(Json(DataResponse {
        data: OperatorResponse::from(&operator),
    }))
}

/// PUT /api/v1/operators/{id}
///
/// Partial update. Deactivating an account or changing its role ends its
/// sessions, since access tokens carry the role they were issued with.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOperatorRequest>,
) -> AppResult<Json<DataResponse<OperatorResponse>>> {
    input.validate()?;
    if let Some(role) = input.role.as_deref() {
        ensure_known_role(role)?;
    }

    let previous_role = OperatorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Operator",
            id,
        }))?
        .role;

    let operator = OperatorRepo::update(
        &state.pool,
        id,
        &UpdateOperator {
            full_name: input.full_name,
            inn: input.inn,
            role: input.role,
            is_active: input.is_active,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Operator",
        id,
    }))?;

    if input.is_active == Some(false) {
        let revoked = SessionRepo::revoke_all_for_operator(&state.pool, id).await?;
        tracing::info!(operator_id = id, revoked, "Operator deactivated");
    } else if operator.role != previous_role {
        let revoked = SessionRepo::revoke_all_for_operator(&state.pool, id).await?;
        tracing::info!(
            operator_id = id,
            from = %previous_role,
            to = %operator.role,
            revoked,
            "Operator role changed"
        );
    }

    Ok(Json(DataResponse {
        data: OperatorResponse::from(&operator),
    }))
}

/// DELETE /api/v1/operators/{id}
///
/// Accounts with sales on record cannot be deleted; deactivate them instead.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TicketRepo::exists_for_operator(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Operator has sold tickets and cannot be deleted; deactivate the account instead"
                .into(),
        )));
    }
    if OperatorRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Operator",
            id,
        }))
    }
}
