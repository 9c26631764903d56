//! Route definitions for the `/ships` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::ships;
use crate::state::AppState;

/// Routes mounted at `/ships`. Reads need a login, writes need admin.
///
/// ```text
/// GET, POST           /       -> list, create
/// GET, PUT, DELETE    /{id}   -> get_by_id, update, delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ships::list).post(ships::create))
        .route(
            "/{id}",
            get(ships::get_by_id)
                .put(ships::update)
                .delete(ships::delete),
        )
}
