//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! match with 403 Forbidden.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use voskhod_core::error::CoreError;
use voskhod_core::roles::{ROLE_ADMIN, ROLE_CAPTAIN, ROLE_OPERATOR};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `administration` role.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Administration role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires the `operator` role. Only cashiers run shifts and sell tickets.
pub struct RequireOperator(pub AuthUser);

impl FromRequestParts<AppState> for RequireOperator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_OPERATOR {
            return Err(AppError::Core(CoreError::Forbidden(
                "Operator role required".into(),
            )));
        }
        Ok(RequireOperator(user))
    }
}

/// Requires `captain` or `administration` role (boarding checks).
pub struct RequireCaptain(pub AuthUser);

impl FromRequestParts<AppState> for RequireCaptain {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_CAPTAIN && user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Captain or Administration role required".into(),
            )));
        }
        Ok(RequireCaptain(user))
    }
}

/// Requires any authenticated operator.
///
/// Functionally equivalent to [`AuthUser`] but named for route definitions
/// where "this route requires authentication" should read explicitly.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
