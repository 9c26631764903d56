use std::sync::Arc;

use voskhod_core::clock::BusinessClock;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: voskhod_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Business-local calendar used for shifts, ticket days and expiry.
    pub clock: BusinessClock,
}
