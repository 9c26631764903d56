//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Plain reads and writes take `&PgPool`; the steps of multi-statement
//! operations accept any [`sqlx::PgExecutor`] so callers can run them inside
//! a transaction.

pub mod berth_repo;
pub mod landing_place_repo;
pub mod operator_repo;
pub mod price_repo;
pub mod price_type_repo;
pub mod report_repo;
pub mod schedule_repo;
pub mod session_repo;
pub mod ship_repo;
pub mod shift_repo;
pub mod ticket_repo;

pub use berth_repo::BerthRepo;
pub use landing_place_repo::LandingPlaceRepo;
pub use operator_repo::OperatorRepo;
pub use price_repo::PriceRepo;
pub use price_type_repo::PriceTypeRepo;
pub use report_repo::ReportRepo;
pub use schedule_repo::ScheduleRepo;
pub use session_repo::SessionRepo;
pub use ship_repo::ShipRepo;
pub use shift_repo::ShiftRepo;
pub use ticket_repo::TicketRepo;
