//! Route definitions for the `/operators` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::operators;
use crate::state::AppState;

/// Routes mounted at `/operators` (admin only).
///
/// ```text
/// GET, POST           /       -> list, create
/// GET, PUT, DELETE    /{id}   -> get_by_id, update, delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(operators::list).post(operators::create))
        .route(
            "/{id}",
            get(operators::get_by_id)
                .put(operators::update)
                .delete(operators::delete),
        )
}
