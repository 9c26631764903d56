//! Ticket validity and flag rules.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::CoreError;

/// A ticket expires once its departure has started.
///
/// Departure is the schedule's start time on the ticket day, both in business
/// local time. The ticket is already expired at the exact start instant.
pub fn is_expired(ticket_day: NaiveDate, start_time: NaiveTime, now: NaiveDateTime) -> bool {
    now >= ticket_day.and_time(start_time)
}

/// Tickets may be sold for today or a later day, never for the past.
pub fn validate_ticket_day(ticket_day: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if ticket_day < today {
        return Err(CoreError::Validation(format!(
            "Ticket day {ticket_day} is in the past"
        )));
    }
    Ok(())
}

/// Check that `requested` more passengers fit on a departure that already
/// carries `already_sold`.
pub fn check_seat_limit(
    already_sold: i64,
    requested: i64,
    seat_limit: i32,
) -> Result<(), CoreError> {
    let limit = i64::from(seat_limit);
    if already_sold + requested > limit {
        let left = (limit - already_sold).max(0);
        return Err(CoreError::Conflict(format!(
            "Not enough seats: {left} of {limit} left, {requested} requested"
        )));
    }
    Ok(())
}

/// A ticket can be returned once, and only before boarding.
pub fn ensure_can_return(returned: bool, verified: bool) -> Result<(), CoreError> {
    if returned {
        return Err(CoreError::Conflict("Ticket is already returned".into()));
    }
    if verified {
        return Err(CoreError::Conflict(
            "Ticket has already been used for boarding".into(),
        ));
    }
    Ok(())
}

/// Boarding check by the vessel master.
pub fn ensure_can_check_in(
    returned: bool,
    verified: bool,
    ticket_day: NaiveDate,
    today: NaiveDate,
) -> Result<(), CoreError> {
    if returned {
        return Err(CoreError::Conflict("Ticket was returned".into()));
    }
    if verified {
        return Err(CoreError::Conflict("Ticket is already checked in".into()));
    }
    if ticket_day != today {
        return Err(CoreError::Validation(format!(
            "Ticket is valid for {ticket_day}, not today"
        )));
    }
    Ok(())
}
