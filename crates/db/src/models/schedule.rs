//! Ship schedule model and DTOs.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use voskhod_core::types::{DbId, Timestamp};

/// A row from `ship_schedules` joined with its ship and berth.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Schedule {
    pub id: DbId,
    pub ship_id: DbId,
    pub ship_name: String,
    pub seat_limit: i32,
    pub berth_id: Option<DbId>,
    pub berth_name: Option<String>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a schedule.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSchedule {
    pub ship_id: DbId,
    pub berth_id: Option<DbId>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// DTO for updating a schedule. All fields are optional.
///
/// `berth_id` cannot be cleared through this DTO, only replaced.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSchedule {
    pub ship_id: Option<DbId>,
    pub berth_id: Option<DbId>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}
