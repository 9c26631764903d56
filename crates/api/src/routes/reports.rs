//! Route definitions for the `/reports` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports` (admin only).
///
/// ```text
/// GET /       -> list (?date, ?month, ?year, ?shift_id, ?operator_id, ?sort)
/// GET /{id}   -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reports::list))
        .route("/{id}", get(reports::get_by_id))
}
