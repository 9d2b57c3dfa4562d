//! SQLite storage implementation for Wayfare.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `wayfare-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. Everything else is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!     storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```
//!
//! Reads go through the r2d2 pool; every mutation is funneled through a
//! single write actor that wraps each job in an immediate transaction, which
//! is what makes the conditional status updates race-free.

pub mod db;
pub mod errors;
pub mod schema;
pub(crate) mod utils;

// Repository implementations
pub mod bookings;
pub mod hosts;
pub mod payouts;
pub mod plans;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from wayfare-core for convenience
pub use wayfare_core::errors::{DatabaseError, Error, Result};
