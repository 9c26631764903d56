pub mod auth;
pub mod berths;
pub mod landing_places;
pub mod operators;
pub mod price_types;
pub mod prices;
pub mod reports;
pub mod schedules;
pub mod shifts;
pub mod ships;
pub mod tickets;
