//! Route definitions for the `/tickets` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tickets;
use crate::state::AppState;

/// Routes mounted at `/tickets`.
///
/// ```text
/// GET, POST   /                 -> list, create (operator)
/// POST        /verify           -> verify (public)
/// GET         /{id}             -> get_by_id
/// GET         /{id}/receipt     -> receipt
/// POST        /{id}/return      -> return_ticket
/// POST        /{id}/check-in    -> check_in (captain)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tickets::list).post(tickets::create))
        .route("/verify", post(tickets::verify))
        .route("/{id}", get(tickets::get_by_id))
        .route("/{id}/receipt", get(tickets::receipt))
        .route("/{id}/return", post(tickets::return_ticket))
        .route("/{id}/check-in", post(tickets::check_in))
}
