//! Operator session model and DTOs.

use sqlx::FromRow;
use voskhod_core::types::{DbId, Timestamp};

/// A row from the `operator_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct OperatorSession {
    pub id: DbId,
    pub operator_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new session.
pub struct CreateSession {
    pub operator_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
