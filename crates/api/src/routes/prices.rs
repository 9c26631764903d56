//! Route definitions for the `/prices` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::prices;
use crate::state::AppState;

/// Routes mounted at `/prices`. Reads need a login, writes need admin.
///
/// ```text
/// GET, POST           /       -> list, create
/// GET, PUT, DELETE    /{id}   -> get_by_id, update, delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(prices::list).post(prices::create))
        .route(
            "/{id}",
            get(prices::get_by_id)
                .put(prices::update)
                .delete(prices::delete),
        )
}
