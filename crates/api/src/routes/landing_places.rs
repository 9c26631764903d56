//! Route definitions for the `/landing-places` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::landing_places;
use crate::state::AppState;

/// Routes mounted at `/landing-places`. Reads need a login, writes need admin.
///
/// ```text
/// GET, POST           /       -> list, create
/// GET, PUT, DELETE    /{id}   -> get_by_id, update, delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(landing_places::list).post(landing_places::create))
        .route(
            "/{id}",
            get(landing_places::get_by_id)
                .put(landing_places::update)
                .delete(landing_places::delete),
        )
}
