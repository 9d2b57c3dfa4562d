//! Wayfare Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for the Wayfare travel
//! marketplace: the booking and payout lifecycles, refund rules, travel
//! plans, and host onboarding. It is database-agnostic and defines traits
//! that are implemented by the `storage-sqlite` crate.

pub mod bookings;
pub mod constants;
pub mod errors;
pub mod hosts;
pub mod notifications;
pub mod payouts;
pub mod plans;
pub mod statuses;
pub mod utils;

// Re-export the shared status vocabulary; every layer speaks it.
pub use statuses::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
