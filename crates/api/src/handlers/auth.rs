//! Handlers for the `/auth` resource (login, refresh, logout, password).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;
use voskhod_core::error::CoreError;
use voskhod_core::roles::ROLE_OPERATOR;
use voskhod_db::models::operator::{Operator, OperatorResponse};
use voskhod_db::models::session::CreateSession;
use voskhod_db::models::shift::Shift;
use voskhod_db::repositories::{OperatorRepo, SessionRepo, ShiftRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password, MIN_PASSWORD_LENGTH};
use crate::engine::shifts;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "must be at least 8 characters long"))]
    pub new_password: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: OperatorResponse,
    /// Today's open shift of a cashier, if any.
    pub shift: Option<Shift>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Cashiers get today's shift opened
/// on login if they have none yet.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let operator = OperatorRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid username or password".into()))?;

    let password_valid = verify_password(&input.password, &operator.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(username = %input.username, "Login failed: wrong password");
        return Err(AppError::BadRequest("Invalid username or password".into()));
    }

    if !operator.is_active {
        return Err(AppError::BadRequest("Account is inactive".into()));
    }

    OperatorRepo::record_login(&state.pool, operator.id).await?;

    let shift = if operator.role == ROLE_OPERATOR {
        Some(shifts::open_if_absent(&state.pool, operator.id, state.clock.today()).await?)
    } else {
        None
    };

    let response = create_auth_response(&state, &operator, shift).await?;
    tracing::info!(operator_id = operator.id, role = %operator.role, "Operator logged in");
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // Rotation: the old refresh token is single-use.
    SessionRepo::revoke(&state.pool, session.id).await?;

    let operator = OperatorRepo::find_by_id(&state.pool, session.operator_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Operator no longer exists".into()))
        })?;
    if !operator.is_active {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Account is inactive".into(),
        )));
    }

    let shift = if operator.role == ROLE_OPERATOR {
        ShiftRepo::find_open(&state.pool, operator.id, state.clock.today()).await?
    } else {
        None
    };

    let response = create_auth_response(&state, &operator, shift).await?;
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions of the caller. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    SessionRepo::revoke_all_for_operator(&mut *tx, user.operator_id).await?;
    OperatorRepo::record_logout(&mut *tx, user.operator_id).await?;
    tx.commit().await?;

    tracing::info!(operator_id = user.operator_id, "Operator logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/auth/password
///
/// Change the caller's own password.
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    input.validate()?;

    let operator = OperatorRepo::find_by_id(&state.pool, user.operator_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Operator",
            id: user.operator_id,
        }))?;

    let old_valid = verify_password(&input.old_password, &operator.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !old_valid {
        return Err(AppError::BadRequest("Current password is incorrect".into()));
    }

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    OperatorRepo::update_password(&state.pool, operator.id, &hashed).await?;

    tracing::info!(operator_id = operator.id, "Password changed");
    Ok(StatusCode::OK)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Persist a session row, sign tokens bound to it, and build the response.
async fn create_auth_response(
    state: &AppState,
    operator: &Operator,
    shift: Option<Shift>,
) -> AppResult<AuthResponse> {
    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session = SessionRepo::create(
        &state.pool,
        &CreateSession {
            operator_id: operator.id,
            refresh_token_hash: refresh_hash,
            expires_at,
        },
    )
    .await?;

    let access_token =
        generate_access_token(operator.id, &operator.role, session.id, &state.config.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: OperatorResponse::from(operator),
        shift,
    })
}
