//! Route definitions for the `/price-types` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::price_types;
use crate::state::AppState;

/// Routes mounted at `/price-types`. Reads need a login, writes need admin.
///
/// ```text
/// GET, POST           /       -> list, create
/// GET, PUT, DELETE    /{id}   -> get_by_id, update, delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(price_types::list).post(price_types::create))
        .route(
            "/{id}",
            get(price_types::get_by_id)
                .put(price_types::update)
                .delete(price_types::delete),
        )
}
