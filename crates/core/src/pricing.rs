//! Ticket pricing.
//!
//! A ticket references one or more price types. Each price type belongs to a
//! client category and the ticket's total is the sum over its price types of
//! `price * quantity`, where the quantity is the ticket's passenger count for
//! that category.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::money::ensure_storable;

/// Client category a price type applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientCategory {
    Adult,
    Child,
}

impl ClientCategory {
    /// Database representation (matches the `price_types` CHECK constraint).
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCategory::Adult => "adult",
            ClientCategory::Child => "child",
        }
    }
}

impl fmt::Display for ClientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "adult" => Ok(ClientCategory::Adult),
            "child" => Ok(ClientCategory::Child),
            other => Err(CoreError::Validation(format!(
                "Unknown client category '{other}' (expected 'adult' or 'child')"
            ))),
        }
    }
}

/// Passenger counts on a single ticket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quantities {
    pub adult: i32,
    pub child: i32,
}

impl Quantities {
    pub fn for_category(&self, category: ClientCategory) -> i32 {
        match category {
            ClientCategory::Adult => self.adult,
            ClientCategory::Child => self.child,
        }
    }

    pub fn passengers(&self) -> i64 {
        i64::from(self.adult) + i64::from(self.child)
    }

    /// Reject negative counts and empty tickets.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.adult < 0 {
            return Err(CoreError::Validation(
                "Adult quantity cannot be negative".into(),
            ));
        }
        if self.child < 0 {
            return Err(CoreError::Validation(
                "Child quantity cannot be negative".into(),
            ));
        }
        if self.passengers() == 0 {
            return Err(CoreError::Validation(
                "A ticket must carry at least one passenger".into(),
            ));
        }
        Ok(())
    }
}

/// A price type resolved to its category and amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedType {
    pub category: ClientCategory,
    pub amount: Decimal,
}

/// Sum of `amount * quantity` over the ticket's price types.
///
/// Each price type contributes once. Two price types of the same category
/// would both be charged; the database forbids that by keeping categories
/// unique.
pub fn compute_total(price_types: &[PricedType], quantities: Quantities) -> Decimal {
    price_types
        .iter()
        .map(|pt| pt.amount * Decimal::from(quantities.for_category(pt.category)))
        .sum()
}

/// Validate a price amount before it is stored.
pub fn validate_amount(amount: Decimal) -> Result<(), CoreError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(CoreError::Validation("Price cannot be negative".into()));
    }
    if amount.scale() > 2 && amount.round_dp(2) != amount {
        return Err(CoreError::Validation(
            "Price cannot have more than two decimal places".into(),
        ));
    }
    ensure_storable(amount, "Price")
}
