//! Price type model and DTOs.
//!
//! A price type binds a client category (adult/child) to one price.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use voskhod_core::pricing::ClientCategory;
use voskhod_core::types::{DbId, Timestamp};

/// A row from the `price_types` table joined with its price amount.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PriceType {
    pub id: DbId,
    pub client_category: String,
    pub price_id: DbId,
    #[serde(serialize_with = "voskhod_core::money::serialize")]
    pub amount: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a price type.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePriceType {
    pub client_category: ClientCategory,
    pub price_id: DbId,
}

/// DTO for updating a price type. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePriceType {
    pub client_category: Option<ClientCategory>,
    pub price_id: Option<DbId>,
}
