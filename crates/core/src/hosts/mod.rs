//! Hosts module - users, roles, and host applications.

mod hosts_model;
mod hosts_service;
mod hosts_traits;

pub use hosts_model::{ApplicationStatus, HostApplication, NewHostApplication, User};
pub use hosts_service::HostService;
pub use hosts_traits::{
    HostApplicationRepositoryTrait, HostServiceTrait, UserRepositoryTrait,
};
