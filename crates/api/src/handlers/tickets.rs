//! Handlers for the `/tickets` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use voskhod_core::pricing::Quantities;
use voskhod_core::qr::{self, Verification};
use voskhod_core::receipt::Receipt;
use voskhod_core::ticket::is_expired;
use voskhod_core::types::DbId;
use voskhod_db::models::ticket::{Ticket, TicketFilter};
use voskhod_db::repositories::TicketRepo;

use crate::engine::tickets::{self, Sale};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireCaptain, RequireOperator};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    pub schedule_id: DbId,
    pub landing_place_id: Option<DbId>,
    pub price_type_ids: Vec<DbId>,
    pub ticket_day: Option<NaiveDate>,
    #[serde(default)]
    pub adult_quantity: i32,
    #[serde(default)]
    pub child_quantity: i32,
    #[serde(default)]
    pub bought: bool,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    /// Raw text read from the receipt's QR code.
    pub payload: String,
}

/// A ticket with its derived expiry flag.
#[derive(Debug, Serialize)]
pub struct TicketResponse {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub expired: bool,
}

#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    pub ticket_id: DbId,
    pub lines: Vec<String>,
    pub qr_payload: Option<String>,
}

fn to_response(state: &AppState, ticket: Ticket) -> TicketResponse {
    let expired = is_expired(ticket.ticket_day, ticket.start_time, state.clock.now());
    TicketResponse { ticket, expired }
}

/// Load a ticket the caller may see.
async fn visible_ticket(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<Ticket> {
    let ticket = tickets::load(&state.pool, id).await?;
    user.ensure_owner_or_admin(ticket.operator_id)?;
    Ok(ticket)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/tickets
///
/// Sell a ticket on the caller's open shift.
pub async fn create(
    State(state): State<AppState>,
    RequireOperator(user): RequireOperator,
    Json(input): Json<CreateTicketRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<TicketResponse>>)> {
    let sale = Sale {
        schedule_id: input.schedule_id,
        landing_place_id: input.landing_place_id,
        price_type_ids: input.price_type_ids,
        ticket_day: input.ticket_day,
        quantities: Quantities {
            adult: input.adult_quantity,
            child: input.child_quantity,
        },
        bought: input.bought,
    };
    let ticket = tickets::sell(&state.pool, &state.clock, user.operator_id, sale).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: to_response(&state, ticket),
        }),
    ))
}

/// GET /api/v1/tickets
///
/// Cashiers see their own tickets; administrators see all.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filter): Query<TicketFilter>,
) -> AppResult<Json<DataResponse<Vec<TicketResponse>>>> {
    let owner = if user.is_admin() {
        None
    } else {
        Some(user.operator_id)
    };
    let tickets = TicketRepo::list(&state.pool, owner, &filter).await?;
    Ok(Json(DataResponse {
        data: tickets
            .into_iter()
            .map(|t| to_response(&state, t))
            .collect(),
    }))
}

/// GET /api/v1/tickets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TicketResponse>>> {
    let ticket = visible_ticket(&state, &user, id).await?;
    Ok(Json(DataResponse {
        data: to_response(&state, ticket),
    }))
}

/// GET /api/v1/tickets/{id}/receipt
///
/// Receipt text lines and the QR payload to print next to them.
pub async fn receipt(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ReceiptResponse>>> {
    let ticket = visible_ticket(&state, &user, id).await?;
    let lines = Receipt {
        cashier: &ticket.operator_username,
        ticket_day: ticket.ticket_day,
        start_time: ticket.start_time,
        end_time: ticket.end_time,
        ship: &ticket.ship_name,
        landing_place: ticket.landing_place_address.as_deref(),
        berth: ticket.berth_name.as_deref(),
        adult_quantity: ticket.adult_quantity,
        child_quantity: ticket.child_quantity,
        created_on: state.clock.date_of(ticket.created_at),
        total_amount: ticket.total_amount,
    }
    .lines();

    Ok(Json(DataResponse {
        data: ReceiptResponse {
            ticket_id: ticket.id,
            lines,
            qr_payload: ticket.qr_payload,
        },
    }))
}

/// POST /api/v1/tickets/{id}/return
pub async fn return_ticket(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TicketResponse>>> {
    let ticket = tickets::return_ticket(&state.pool, &user, id).await?;
    Ok(Json(DataResponse {
        data: to_response(&state, ticket),
    }))
}

/// POST /api/v1/tickets/{id}/check-in
///
/// Boarding check by the vessel master.
pub async fn check_in(
    State(state): State<AppState>,
    RequireCaptain(user): RequireCaptain,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TicketResponse>>> {
    let ticket = tickets::check_in(&state.pool, &state.clock, id).await?;
    tracing::debug!(captain_id = user.operator_id, ticket_id = id, "Boarding check-in");
    Ok(Json(DataResponse {
        data: to_response(&state, ticket),
    }))
}

/// POST /api/v1/tickets/verify
///
/// Judge a scanned QR payload against the current time. Public: the payload
/// is self-contained, so nothing is read from or written to the database.
pub async fn verify(
    State(state): State<AppState>,
    Json(input): Json<VerifyRequest>,
) -> AppResult<Json<DataResponse<Verification>>> {
    let verification = qr::verify(&input.payload, state.clock.now())?;
    Ok(Json(DataResponse { data: verification }))
}
