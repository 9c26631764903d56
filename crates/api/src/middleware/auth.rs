//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use voskhod_core::error::CoreError;
use voskhod_core::roles::ROLE_ADMIN;
use voskhod_core::types::DbId;
use voskhod_db::repositories::SessionRepo;

use crate::auth::jwt::validate_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Operator extracted from a Bearer token in the `Authorization` header.
///
/// Besides the token signature and expiry, the session named in the token
/// must still be active. Revoked sessions (logout, closed shift, nightly
/// sweep) are rejected with 401.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub operator_id: DbId,
    pub role: String,
    pub session_id: DbId,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Allow access to a record owned by `owner_id` for its owner or an
    /// administrator.
    pub fn ensure_owner_or_admin(&self, owner_id: DbId) -> AppResult<()> {
        if self.is_admin() || self.operator_id == owner_id {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(
                "This record belongs to another operator".into(),
            )))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        if !SessionRepo::is_active(&state.pool, claims.sid, claims.sub).await? {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Session has ended, please log in again".into(),
            )));
        }

        Ok(AuthUser {
            operator_id: claims.sub,
            role: claims.role,
            session_id: claims.sid,
        })
    }
}
