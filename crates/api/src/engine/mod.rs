//! Multi-step write paths shared by handlers and background jobs.
//!
//! Every operation here runs in a single transaction and locks the owning
//! shift row first, so a shift's report is never recomputed concurrently.

pub mod reports;
pub mod shifts;
pub mod tickets;
