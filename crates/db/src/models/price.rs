//! Ticket price model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use voskhod_core::types::{DbId, Timestamp};

/// A row from the `prices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Price {
    pub id: DbId,
    #[serde(serialize_with = "voskhod_core::money::serialize")]
    pub amount: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a price.
#[derive(Debug, Clone, Deserialize)]
pub struct SavePrice {
    pub amount: Decimal,
}
