//! SQLite storage implementation for bookings.

mod model;
mod repository;

pub use model::{BookingDB, GuestDB};
pub use repository::BookingRepository;
