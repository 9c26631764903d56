//! Sales report aggregation and report query filters.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::CoreError;

/// The part of a ticket that contributes to a sales report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketLine {
    pub adult_quantity: i32,
    pub child_quantity: i32,
    pub total_amount: Decimal,
    pub returned: bool,
}

/// Aggregated sales of one shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SalesTotals {
    pub total_adult_quantity: i64,
    pub total_child_quantity: i64,
    #[serde(serialize_with = "crate::money::serialize")]
    pub total_amount: Decimal,
}

/// Re-aggregate a shift's tickets from scratch. Returned tickets are left out.
pub fn aggregate<'a, I>(lines: I) -> SalesTotals
where
    I: IntoIterator<Item = &'a TicketLine>,
{
    lines
        .into_iter()
        .filter(|line| !line.returned)
        .fold(SalesTotals::default(), |mut acc, line| {
            acc.total_adult_quantity += i64::from(line.adult_quantity);
            acc.total_child_quantity += i64::from(line.child_quantity);
            acc.total_amount += line.total_amount;
            acc
        })
}

/// Which report dates a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    All,
    Day(NaiveDate),
    Month { year: i32, month: u32 },
    /// The given month of every year.
    MonthOfAnyYear(u32),
    Year(i32),
}

impl ReportPeriod {
    /// Build a period from raw query parameters. A specific date wins over
    /// month and year.
    pub fn from_params(
        date: Option<NaiveDate>,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<Self, CoreError> {
        if let Some(month) = month {
            if !(1..=12).contains(&month) {
                return Err(CoreError::Validation(format!(
                    "Month must be between 1 and 12, got {month}"
                )));
            }
        }
        Ok(match (date, month, year) {
            (Some(date), _, _) => ReportPeriod::Day(date),
            (None, Some(month), Some(year)) => ReportPeriod::Month { year, month },
            (None, Some(month), None) => ReportPeriod::MonthOfAnyYear(month),
            (None, None, Some(year)) => ReportPeriod::Year(year),
            (None, None, None) => ReportPeriod::All,
        })
    }

    /// Year and month when the listing should carry monthly totals.
    pub fn month_with_year(&self) -> Option<(i32, u32)> {
        match *self {
            ReportPeriod::Month { year, month } => Some((year, month)),
            _ => None,
        }
    }
}

/// Ordering of a report listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportSort {
    #[default]
    Newest,
    AmountAsc,
    AmountDesc,
}

impl ReportSort {
    /// SQL `ORDER BY` clause. Only ever built from this closed set.
    pub fn order_by(self) -> &'static str {
        match self {
            ReportSort::Newest => "report_date DESC, id DESC",
            ReportSort::AmountAsc => "total_amount ASC, id ASC",
            ReportSort::AmountDesc => "total_amount DESC, id DESC",
        }
    }
}

impl FromStr for ReportSort {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(ReportSort::Newest),
            "amount_asc" => Ok(ReportSort::AmountAsc),
            "amount_desc" => Ok(ReportSort::AmountDesc),
            other => Err(CoreError::Validation(format!(
                "Unknown sort '{other}' (expected newest, amount_asc or amount_desc)"
            ))),
        }
    }
}
