//! Route definitions for the `/shifts` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::shifts;
use crate::state::AppState;

/// Routes mounted at `/shifts`.
///
/// ```text
/// GET, POST   /                          -> list (admin), open (operator)
/// GET         /current                   -> get_current (operator)
/// PUT         /current/landing-places    -> set_current_landing_places (operator)
/// POST        /current/close             -> close_current (operator)
/// GET         /{id}                      -> get_by_id (admin)
/// POST        /{id}/close                -> close_by_id (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(shifts::list).post(shifts::open))
        .route("/current", get(shifts::get_current))
        .route(
            "/current/landing-places",
            put(shifts::set_current_landing_places),
        )
        .route("/current/close", post(shifts::close_current))
        .route("/{id}", get(shifts::get_by_id))
        .route("/{id}/close", post(shifts::close_by_id))
}
