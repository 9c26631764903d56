//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod berth;
pub mod landing_place;
pub mod operator;
pub mod price;
pub mod price_type;
pub mod report;
pub mod schedule;
pub mod session;
pub mod ship;
pub mod shift;
pub mod ticket;
