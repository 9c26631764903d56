//! Route definitions for the `/berths` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::berths;
use crate::state::AppState;

/// Routes mounted at `/berths`. Reads need a login, writes need admin.
///
/// ```text
/// GET, POST           /       -> list, create
/// GET, PUT, DELETE    /{id}   -> get_by_id, update, delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(berths::list).post(berths::create))
        .route(
            "/{id}",
            get(berths::get_by_id)
                .put(berths::update)
                .delete(berths::delete),
        )
}
