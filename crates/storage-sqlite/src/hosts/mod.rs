//! SQLite storage implementation for users and host applications.

mod model;
mod repository;

pub use model::{HostApplicationDB, UserDB};
pub use repository::{HostApplicationRepository, UserRepository};
