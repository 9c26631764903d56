//! Money amounts.
//!
//! Every amount is stored as `NUMERIC(12,2)` and rendered with exactly two
//! decimal places, including zero.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::error::CoreError;

/// Decimal places of every stored amount.
pub const SCALE: u32 = 2;

/// Largest amount a `NUMERIC(12,2)` column holds: 9 999 999 999.99.
pub fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999, SCALE)
}

/// The amount with exactly two decimal places.
///
/// Postgres hands back a zero `NUMERIC` without its scale, so amounts are
/// normalized before they reach a client.
pub fn normalize(amount: Decimal) -> Decimal {
    let mut amount = amount;
    amount.rescale(SCALE);
    amount
}

/// Reject amounts that do not fit the storage column.
pub fn ensure_storable(amount: Decimal, what: &str) -> Result<(), CoreError> {
    if amount.abs() > max_amount() {
        return Err(CoreError::Validation(format!(
            "{what} {} exceeds the maximum of {}",
            normalize(amount),
            max_amount()
        )));
    }
    Ok(())
}

/// `serialize_with` helper for amount fields.
pub fn serialize<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    Serialize::serialize(&normalize(*amount), serializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[derive(Serialize)]
    struct Line {
        #[serde(serialize_with = "serialize")]
        total: Decimal,
    }

    fn rendered(total: Decimal) -> serde_json::Value {
        serde_json::to_value(Line { total }).unwrap()["total"].clone()
    }

    #[test]
    fn zero_keeps_two_places() {
        assert_eq!(rendered(Decimal::ZERO), "0.00");
        assert_eq!(rendered(Decimal::new(0, 0)), "0.00");
    }

    #[test]
    fn amounts_render_with_cents() {
        assert_eq!(rendered(Decimal::new(1000, 0)), "1000.00");
        assert_eq!(rendered(Decimal::new(25050, 2)), "250.50");
        assert_eq!(rendered(Decimal::new(12, 1)), "1.20");
    }

    #[test]
    fn column_bound_is_inclusive() {
        assert!(ensure_storable(max_amount(), "Total").is_ok());
        assert_matches!(
            ensure_storable(max_amount() + Decimal::new(1, 2), "Total"),
            Err(CoreError::Validation(msg)) if msg.starts_with("Total 10000000000.00 exceeds")
        );
    }
}
