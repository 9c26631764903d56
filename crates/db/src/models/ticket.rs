//! Ticket model and DTOs.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use voskhod_core::report::TicketLine;
use voskhod_core::types::{DbId, Timestamp};

/// A row from `tickets` joined with everything a receipt needs.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ticket {
    pub id: DbId,
    pub shift_id: DbId,
    pub operator_id: DbId,
    pub operator_username: String,
    pub schedule_id: DbId,
    pub ship_name: String,
    pub berth_name: Option<String>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub landing_place_id: Option<DbId>,
    pub landing_place_address: Option<String>,
    pub price_type_ids: Vec<DbId>,
    pub ticket_day: NaiveDate,
    pub adult_quantity: i32,
    pub child_quantity: i32,
    #[serde(serialize_with = "voskhod_core::money::serialize")]
    pub total_amount: Decimal,
    pub bought: bool,
    pub verified: bool,
    pub returned: bool,
    pub qr_payload: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a ticket. The total is computed before insert.
#[derive(Debug, Clone)]
pub struct CreateTicket {
    pub shift_id: DbId,
    pub schedule_id: DbId,
    pub landing_place_id: Option<DbId>,
    pub ticket_day: NaiveDate,
    pub adult_quantity: i32,
    pub child_quantity: i32,
    pub total_amount: Decimal,
    pub bought: bool,
}

/// Listing filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketFilter {
    pub shift_id: Option<DbId>,
    pub ticket_day: Option<NaiveDate>,
}

/// The report-relevant columns of a ticket.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct TicketLineRow {
    pub adult_quantity: i32,
    pub child_quantity: i32,
    pub total_amount: Decimal,
    pub returned: bool,
}

impl From<TicketLineRow> for TicketLine {
    fn from(row: TicketLineRow) -> Self {
        TicketLine {
            adult_quantity: row.adult_quantity,
            child_quantity: row.child_quantity,
            total_amount: row.total_amount,
            returned: row.returned,
        }
    }
}
