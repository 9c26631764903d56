//! Shift ("point of sale") model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use voskhod_core::error::CoreError;
use voskhod_core::shift::ShiftStatus;
use voskhod_core::types::{DbId, Timestamp};

/// A row from `shifts` joined with its operator and landing places.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Shift {
    pub id: DbId,
    pub operator_id: DbId,
    pub operator_username: String,
    pub opened_on: NaiveDate,
    pub closed_on: Option<NaiveDate>,
    pub status: String,
    pub landing_place_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Shift {
    pub fn status(&self) -> Result<ShiftStatus, CoreError> {
        self.status.parse()
    }
}

/// Listing filters for administrators.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShiftFilter {
    pub status: Option<ShiftStatus>,
    pub operator_id: Option<DbId>,
    pub date: Option<NaiveDate>,
}
