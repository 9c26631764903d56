pub mod auth;
pub mod berths;
pub mod health;
pub mod landing_places;
pub mod operators;
pub mod price_types;
pub mod prices;
pub mod reports;
pub mod schedules;
pub mod shifts;
pub mod ships;
pub mod tickets;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout
/// /auth/password                       change own password (PUT)
///
/// /operators                           list, create (admin only)
/// /operators/{id}                      get, update, delete
///
/// /prices, /price-types                catalog: list, create
/// /ships, /berths                      (reads: any login, writes: admin)
/// /schedules, /landing-places
/// /<catalog>/{id}                      get, update, delete
///
/// /shifts                              list (admin), open (operator)
/// /shifts/current                      operator's open shift
/// /shifts/current/landing-places       replace landing places (PUT)
/// /shifts/current/close                close own shift (POST)
/// /shifts/{id}                         get (admin)
/// /shifts/{id}/close                   force close (admin, POST)
///
/// /tickets                             list, sell (operator)
/// /tickets/verify                      check a scanned QR payload (public)
/// /tickets/{id}                        get
/// /tickets/{id}/receipt                receipt lines and QR payload
/// /tickets/{id}/return                 return (POST)
/// /tickets/{id}/check-in               boarding check (captain, POST)
///
/// /reports                             list with period filters (admin)
/// /reports/{id}                        get (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/operators", operators::router())
        .nest("/prices", prices::router())
        .nest("/price-types", price_types::router())
        .nest("/ships", ships::router())
        .nest("/berths", berths::router())
        .nest("/schedules", schedules::router())
        .nest("/landing-places", landing_places::router())
        .nest("/shifts", shifts::router())
        .nest("/tickets", tickets::router())
        .nest("/reports", reports::router())
}
