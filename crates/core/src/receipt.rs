//! Plain-text receipt lines printed next to the ticket QR code.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::money::normalize;

const SEPARATOR: &str = "------------------------------------------------";

#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    pub cashier: &'a str,
    pub ticket_day: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub ship: &'a str,
    pub landing_place: Option<&'a str>,
    pub berth: Option<&'a str>,
    pub adult_quantity: i32,
    pub child_quantity: i32,
    pub created_on: NaiveDate,
    pub total_amount: Decimal,
}

impl Receipt<'_> {
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Cashier: {}", self.cashier),
            format!("Valid until: {}", self.ticket_day),
            String::new(),
            format!("Departure: {}", self.start_time.format("%H:%M")),
            format!("Arrival: {}", self.end_time.format("%H:%M")),
            String::new(),
            format!("Ship: {}", self.ship),
            format!("Landing place: {}", self.landing_place.unwrap_or("-")),
            format!("Berth: {}", self.berth.unwrap_or("-")),
            format!("Adults: {}", self.adult_quantity),
            format!("Children: {}", self.child_quantity),
            format!("Ticket date: {}", self.created_on),
            SEPARATOR.to_string(),
            format!("Total: {}", normalize(self.total_amount)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_lists_trip_and_total() {
        let receipt = Receipt {
            cashier: "kassa1",
            ticket_day: NaiveDate::from_ymd_opt(2026, 7, 12).unwrap(),
            start_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
            ship: "Zarya",
            landing_place: None,
            berth: Some("Pier 3"),
            adult_quantity: 2,
            child_quantity: 0,
            created_on: NaiveDate::from_ymd_opt(2026, 7, 11).unwrap(),
            total_amount: Decimal::new(100000, 2),
        };
        let lines = receipt.lines();
        assert_eq!(lines[0], "Cashier: kassa1");
        assert!(lines.contains(&"Departure: 11:00".to_string()));
        assert!(lines.contains(&"Landing place: -".to_string()));
        assert!(lines.contains(&"Berth: Pier 3".to_string()));
        assert_eq!(lines.last().unwrap(), "Total: 1000.00");
    }
}
