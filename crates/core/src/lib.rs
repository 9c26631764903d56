//! Domain rules for the Voskhod ticket office.
//!
//! This crate has no IO: everything here is pure computation shared by the
//! repository layer and the HTTP handlers.

pub mod clock;
pub mod error;
pub mod money;
pub mod pricing;
pub mod qr;
pub mod receipt;
pub mod report;
pub mod roles;
pub mod shift;
pub mod ticket;
pub mod types;
