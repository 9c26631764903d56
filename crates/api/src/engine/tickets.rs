//! Ticket sale, return and boarding check-in.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use sqlx::PgPool;
use voskhod_core::clock::BusinessClock;
use voskhod_core::error::CoreError;
use voskhod_core::money::ensure_storable;
use voskhod_core::pricing::{compute_total, PricedType, Quantities};
use voskhod_core::qr::TicketQrPayload;
use voskhod_core::shift::{ensure_can_sell, ShiftStatus};
use voskhod_core::ticket::{
    check_seat_limit, ensure_can_check_in, ensure_can_return, validate_ticket_day,
};
use voskhod_core::types::DbId;
use voskhod_db::models::ticket::{CreateTicket, Ticket};
use voskhod_db::repositories::{
    LandingPlaceRepo, OperatorRepo, PriceTypeRepo, ScheduleRepo, ShiftRepo, TicketRepo,
};

use crate::engine::reports::recompute_for_shift;
use crate::engine::shifts::dedup;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// A validated-at-the-edge sale request.
#[derive(Debug, Clone)]
pub struct Sale {
    pub schedule_id: DbId,
    pub landing_place_id: Option<DbId>,
    pub price_type_ids: Vec<DbId>,
    /// Defaults to the current business day.
    pub ticket_day: Option<NaiveDate>,
    pub quantities: Quantities,
    pub bought: bool,
}

/// Sell a ticket on the operator's open shift.
///
/// Prices the ticket, enforces the seat limit, stores the QR payload and
/// recomputes the shift's report, all in one transaction.
pub async fn sell(
    pool: &PgPool,
    clock: &BusinessClock,
    operator_id: DbId,
    sale: Sale,
) -> AppResult<Ticket> {
    let today = clock.today();
    let ticket_day = sale.ticket_day.unwrap_or(today);
    validate_ticket_day(ticket_day, today)?;
    sale.quantities.validate()?;

    let price_type_ids = dedup(&sale.price_type_ids);
    if price_type_ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one price type is required".into(),
        )));
    }

    let operator = OperatorRepo::find_by_id(pool, operator_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Operator",
            id: operator_id,
        }))?;

    let landing_place = match sale.landing_place_id {
        Some(id) => Some(
            LandingPlaceRepo::find_by_id(pool, id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "LandingPlace",
                    id,
                }))?,
        ),
        None => None,
    };

    let mut tx = pool.begin().await?;

    let (shift_id, opened_on, status) = ShiftRepo::lock_latest_open(&mut *tx, operator_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "Cannot sell tickets: no shift is open today".into(),
            ))
        })?;
    ensure_can_sell(status.parse::<ShiftStatus>()?, opened_on, today)?;

    let price_types = PriceTypeRepo::find_many(&mut *tx, &price_type_ids).await?;
    if price_types.len() != price_type_ids.len() {
        let found: BTreeSet<DbId> = price_types.iter().map(|pt| pt.id).collect();
        let missing: Vec<String> = price_type_ids
            .iter()
            .filter(|id| !found.contains(id))
            .map(|id| id.to_string())
            .collect();
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown price type(s): {}",
            missing.join(", ")
        ))));
    }
    let priced = price_types
        .iter()
        .map(|pt| {
            Ok(PricedType {
                category: pt.client_category.parse()?,
                amount: pt.amount,
            })
        })
        .collect::<Result<Vec<_>, CoreError>>()?;

    if !ScheduleRepo::lock(&mut *tx, sale.schedule_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Schedule",
            id: sale.schedule_id,
        }));
    }
    let schedule = ScheduleRepo::find_by_id(&mut *tx, sale.schedule_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Schedule",
            id: sale.schedule_id,
        }))?;

    let sold = TicketRepo::sold_passengers(&mut *tx, schedule.id, ticket_day).await?;
    check_seat_limit(sold, sale.quantities.passengers(), schedule.seat_limit)?;

    let total_amount = compute_total(&priced, sale.quantities);
    ensure_storable(total_amount, "Ticket total")?;
    let ticket_id = TicketRepo::insert(
        &mut *tx,
        &CreateTicket {
            shift_id,
            schedule_id: schedule.id,
            landing_place_id: sale.landing_place_id,
            ticket_day,
            adult_quantity: sale.quantities.adult,
            child_quantity: sale.quantities.child,
            total_amount,
            bought: sale.bought,
        },
    )
    .await?;
    TicketRepo::add_price_types(&mut *tx, ticket_id, &price_type_ids).await?;

    let payload = TicketQrPayload {
        id: ticket_id,
        operator: operator.username,
        ticket_day,
        ship: schedule.ship_name,
        start_time: schedule.start_time,
        end_time: schedule.end_time,
        total_amount,
        landing_place: landing_place.map(|lp| lp.address),
        created_on: today,
        bought: sale.bought,
        adult_quantity: sale.quantities.adult,
        child_quantity: sale.quantities.child,
    }
    .encode()?;
    TicketRepo::set_qr_payload(&mut *tx, ticket_id, &payload).await?;

    recompute_for_shift(&mut tx, shift_id, opened_on).await?;
    tx.commit().await?;

    tracing::info!(
        operator_id,
        shift_id,
        ticket_id,
        %total_amount,
        passengers = sale.quantities.passengers(),
        "Ticket sold"
    );
    load(pool, ticket_id).await
}

/// Mark a ticket returned and drop it from the shift's report.
///
/// The owner may return tickets while their shift is open; administrators
/// may return any ticket.
pub async fn return_ticket(pool: &PgPool, user: &AuthUser, ticket_id: DbId) -> AppResult<Ticket> {
    let ticket = load(pool, ticket_id).await?;

    let mut tx = pool.begin().await?;
    let (owner_id, opened_on, status) = ShiftRepo::lock_by_id(&mut *tx, ticket.shift_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Shift",
            id: ticket.shift_id,
        }))?;

    if !user.is_admin() {
        user.ensure_owner_or_admin(owner_id)?;
        if status.parse::<ShiftStatus>()? != ShiftStatus::Open {
            return Err(AppError::Core(CoreError::Forbidden(
                "Tickets of a closed shift can only be returned by administration".into(),
            )));
        }
    }

    let (_, returned, verified, _) = TicketRepo::lock(&mut *tx, ticket_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id: ticket_id,
        }))?;
    ensure_can_return(returned, verified)?;

    TicketRepo::mark_returned(&mut *tx, ticket_id).await?;
    recompute_for_shift(&mut tx, ticket.shift_id, opened_on).await?;
    tx.commit().await?;

    tracing::info!(
        operator_id = user.operator_id,
        shift_id = ticket.shift_id,
        ticket_id,
        "Ticket returned"
    );
    load(pool, ticket_id).await
}

/// Mark a ticket as used for boarding today.
pub async fn check_in(pool: &PgPool, clock: &BusinessClock, ticket_id: DbId) -> AppResult<Ticket> {
    let mut tx = pool.begin().await?;
    let (_, returned, verified, ticket_day) = TicketRepo::lock(&mut *tx, ticket_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id: ticket_id,
        }))?;
    ensure_can_check_in(returned, verified, ticket_day, clock.today())?;
    TicketRepo::mark_verified(&mut *tx, ticket_id).await?;
    tx.commit().await?;

    tracing::info!(ticket_id, "Ticket checked in");
    load(pool, ticket_id).await
}

pub async fn load(pool: &PgPool, ticket_id: DbId) -> AppResult<Ticket> {
    TicketRepo::find_by_id(pool, ticket_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id: ticket_id,
        }))
}
