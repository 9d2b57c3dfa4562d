//! User and host application repository and service traits.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::hosts_model::{ApplicationStatus, HostApplication, NewHostApplication, User};
use crate::errors::Result;
use crate::statuses::UserRole;

/// Trait defining the contract for User repository operations.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Retrieves a user by ID.
    fn get_by_id(&self, user_id: &str) -> Result<User>;

    /// Lists users holding one role.
    fn list_by_role(&self, role: UserRole) -> Result<Vec<User>>;

    /// Sets a user's role. Admin-triggered only.
    async fn set_role(&self, user_id: &str, role: UserRole) -> Result<User>;
}

/// Trait defining the contract for HostApplication repository operations.
#[async_trait]
pub trait HostApplicationRepositoryTrait: Send + Sync {
    /// Files a new PENDING application.
    async fn create(&self, new_application: NewHostApplication) -> Result<HostApplication>;

    /// Retrieves an application by ID.
    fn get_by_id(&self, application_id: &str) -> Result<HostApplication>;

    /// The pending queue, oldest first.
    fn list_pending(&self) -> Result<Vec<HostApplication>>;

    /// Records the decision, conditioned on the application still being
    /// PENDING. Deciding twice matches zero rows and fails cleanly.
    async fn decide(
        &self,
        application_id: &str,
        status: ApplicationStatus,
        decided_at: NaiveDateTime,
    ) -> Result<HostApplication>;
}

/// Trait defining the contract for host onboarding service operations.
#[async_trait]
pub trait HostServiceTrait: Send + Sync {
    /// Submits a host application for a regular user.
    async fn apply_for_host(&self, new_application: NewHostApplication) -> Result<HostApplication>;

    /// The pending queue, oldest first.
    fn list_pending_applications(&self) -> Result<Vec<HostApplication>>;

    /// Every user currently holding the HOST role.
    fn list_hosts(&self) -> Result<Vec<User>>;

    /// Approves an application: user becomes HOST, application leaves the
    /// queue, applicant is notified best-effort.
    async fn approve_application(&self, application_id: &str) -> Result<HostApplication>;

    /// Rejects an application; applicant is notified best-effort.
    async fn reject_application(
        &self,
        application_id: &str,
        reason: Option<String>,
    ) -> Result<HostApplication>;
}
