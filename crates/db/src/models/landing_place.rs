//! Landing place model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use voskhod_core::types::{DbId, Timestamp};

/// A row from the `landing_places` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LandingPlace {
    pub id: DbId,
    pub address: String,
    pub currently_working: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a landing place.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLandingPlace {
    pub address: String,
    #[serde(default)]
    pub currently_working: bool,
}

/// DTO for updating a landing place. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLandingPlace {
    pub address: Option<String>,
    pub currently_working: Option<bool>,
}
