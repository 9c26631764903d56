//! QR payload printed on every ticket receipt.
//!
//! The payload is a self-contained JSON document so a scanner can judge a
//! ticket without talking to the database.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::ticket::is_expired;
use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketQrPayload {
    pub id: DbId,
    /// Cashier username.
    pub operator: String,
    pub ticket_day: NaiveDate,
    pub ship: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(serialize_with = "crate::money::serialize")]
    pub total_amount: Decimal,
    pub landing_place: Option<String>,
    pub created_on: NaiveDate,
    pub bought: bool,
    pub adult_quantity: i32,
    pub child_quantity: i32,
}

impl TicketQrPayload {
    pub fn encode(&self) -> Result<String, CoreError> {
        serde_json::to_string(self)
            .map_err(|e| CoreError::Internal(format!("QR payload encoding failed: {e}")))
    }

    pub fn decode(raw: &str) -> Result<Self, CoreError> {
        serde_json::from_str(raw.trim())
            .map_err(|e| CoreError::Validation(format!("Unreadable ticket QR payload: {e}")))
    }
}

/// Outcome of checking a scanned payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verification {
    pub id: DbId,
    pub ticket_day: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub adult_quantity: i32,
    pub child_quantity: i32,
    pub expired: bool,
    /// A ticket is valid when it was paid for and has not expired.
    pub valid: bool,
}

/// Re-validate a scanned payload against the current business-local time.
pub fn verify(raw: &str, now: NaiveDateTime) -> Result<Verification, CoreError> {
    let payload = TicketQrPayload::decode(raw)?;
    let expired = is_expired(payload.ticket_day, payload.start_time, now);
    Ok(Verification {
        id: payload.id,
        ticket_day: payload.ticket_day,
        start_time: payload.start_time,
        end_time: payload.end_time,
        adult_quantity: payload.adult_quantity,
        child_quantity: payload.child_quantity,
        expired,
        valid: payload.bought && !expired,
    })
}
