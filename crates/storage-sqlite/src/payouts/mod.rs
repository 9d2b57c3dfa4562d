//! SQLite storage implementation for payouts.

mod model;
mod repository;

pub use model::PayoutDB;
pub use repository::PayoutRepository;
