//! Business-local time.
//!
//! Shifts, ticket days and the nightly sweep all follow the wall clock of the
//! pier, not UTC. The pier's zone is a fixed UTC offset (no DST in the
//! operating region), so [`FixedOffset`] is enough.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, Utc};

use crate::error::CoreError;

/// Default offset: UTC+6.
pub const DEFAULT_OFFSET_MINUTES: i32 = 360;

/// Converts UTC instants into the business-local calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessClock {
    offset: FixedOffset,
}

impl Default for BusinessClock {
    fn default() -> Self {
        Self {
            offset: FixedOffset::east_opt(DEFAULT_OFFSET_MINUTES * 60)
                .expect("default offset is within a day"),
        }
    }
}

impl BusinessClock {
    /// Build a clock from an offset in minutes east of UTC.
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, CoreError> {
        let offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                CoreError::Validation(format!("UTC offset of {minutes} minutes is out of range"))
            })?;
        Ok(Self { offset })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Local wall-clock time of a UTC instant.
    pub fn local(&self, at: DateTime<Utc>) -> NaiveDateTime {
        at.with_timezone(&self.offset).naive_local()
    }

    /// Local calendar day of a UTC instant.
    pub fn date_of(&self, at: DateTime<Utc>) -> NaiveDate {
        self.local(at).date()
    }

    pub fn now(&self) -> NaiveDateTime {
        self.local(Utc::now())
    }

    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }

    /// Time left from `at` until the next local midnight.
    ///
    /// Never returns zero: exactly at midnight the next run is a full day away.
    pub fn until_next_midnight(&self, at: DateTime<Utc>) -> Duration {
        let local = self.local(at);
        let next_day = local.date().succ_opt().unwrap_or(local.date());
        let midnight = next_day.and_hms_opt(0, 0, 0).unwrap_or(local);
        let left = midnight - local;
        if left <= Duration::zero() {
            Duration::days(1)
        } else {
            left
        }
    }
}
