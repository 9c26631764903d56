//! Operator account model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use voskhod_core::types::{DbId, Timestamp};

/// Full row from the `operators` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`OperatorResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Operator {
    pub id: DbId,
    pub username: String,
    pub full_name: Option<String>,
    pub inn: Option<String>,
    pub role: String,
    pub password_hash: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub last_logout_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe operator representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct OperatorResponse {
    pub id: DbId,
    pub username: String,
    pub full_name: Option<String>,
    pub inn: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub last_logout_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<&Operator> for OperatorResponse {
    fn from(op: &Operator) -> Self {
        Self {
            id: op.id,
            username: op.username.clone(),
            full_name: op.full_name.clone(),
            inn: op.inn.clone(),
            role: op.role.clone(),
            is_active: op.is_active,
            last_login_at: op.last_login_at,
            last_logout_at: op.last_logout_at,
            created_at: op.created_at,
        }
    }
}

/// DTO for creating a new operator. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateOperator {
    pub username: String,
    pub full_name: Option<String>,
    pub inn: Option<String>,
    pub role: String,
    pub password_hash: String,
}

/// DTO for updating an operator. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOperator {
    pub full_name: Option<String>,
    pub inn: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}
