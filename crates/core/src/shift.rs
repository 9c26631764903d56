//! Shift lifecycle.
//!
//! A shift is a per-operator, per-day sales session. It has exactly two
//! states and a single transition: `open -> archived`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftStatus {
    Open,
    Archived,
}

impl ShiftStatus {
    /// Database representation (matches the `shifts` CHECK constraint).
    pub fn as_str(self) -> &'static str {
        match self {
            ShiftStatus::Open => "open",
            ShiftStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(ShiftStatus::Open),
            "archived" => Ok(ShiftStatus::Archived),
            other => Err(CoreError::Validation(format!(
                "Unknown shift status '{other}' (expected 'open' or 'archived')"
            ))),
        }
    }
}

/// Check that a shift in `status` may be closed.
pub fn ensure_can_close(status: ShiftStatus) -> Result<(), CoreError> {
    match status {
        ShiftStatus::Open => Ok(()),
        ShiftStatus::Archived => Err(CoreError::Conflict("Shift is already closed".into())),
    }
}

/// Check that tickets may be sold on a shift opened on `opened_on`.
///
/// Sales need an open shift from the current business day; yesterday's shift
/// left open (the sweep has not run yet) does not count.
pub fn ensure_can_sell(
    status: ShiftStatus,
    opened_on: NaiveDate,
    today: NaiveDate,
) -> Result<(), CoreError> {
    if status != ShiftStatus::Open || opened_on != today {
        return Err(CoreError::Forbidden(
            "Cannot sell tickets: no shift is open today".into(),
        ));
    }
    Ok(())
}
