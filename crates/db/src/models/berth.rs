//! Berth model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use voskhod_core::types::{DbId, Timestamp};

/// A row from the `berths` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Berth {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveBerth {
    pub name: String,
}
