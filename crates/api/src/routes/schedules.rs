//! Route definitions for the `/schedules` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::schedules;
use crate::state::AppState;

/// Routes mounted at `/schedules`. Reads need a login, writes need admin.
///
/// ```text
/// GET, POST           /       -> list, create
/// GET, PUT, DELETE    /{id}   -> get_by_id, update, delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(schedules::list).post(schedules::create))
        .route(
            "/{id}",
            get(schedules::get_by_id)
                .put(schedules::update)
                .delete(schedules::delete),
        )
}
