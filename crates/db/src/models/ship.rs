//! Ship model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use voskhod_core::types::{DbId, Timestamp};

/// Default number of seats on a ship when none is given.
pub const DEFAULT_SEAT_LIMIT: i32 = 20;

/// A row from the `ships` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ship {
    pub id: DbId,
    pub name: String,
    pub seat_limit: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a ship.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShip {
    pub name: String,
    /// Defaults to [`DEFAULT_SEAT_LIMIT`] if omitted.
    pub seat_limit: Option<i32>,
}

/// DTO for updating a ship. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateShip {
    pub name: Option<String>,
    pub seat_limit: Option<i32>,
}
