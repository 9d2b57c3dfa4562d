use std::sync::Arc;

use chrono::Utc;
use log::debug;

use super::hosts_model::{ApplicationStatus, HostApplication, NewHostApplication, User};
use super::hosts_traits::{
    HostApplicationRepositoryTrait, HostServiceTrait, UserRepositoryTrait,
};
use crate::errors::Result;
use crate::notifications::{notify_best_effort, Notice, NotifierTrait};
use crate::statuses::UserRole;
use crate::Error;

/// Service for host onboarding.
pub struct HostService {
    applications: Arc<dyn HostApplicationRepositoryTrait>,
    users: Arc<dyn UserRepositoryTrait>,
    notifier: Arc<dyn NotifierTrait>,
}

impl HostService {
    /// Creates a new HostService instance.
    pub fn new(
        applications: Arc<dyn HostApplicationRepositoryTrait>,
        users: Arc<dyn UserRepositoryTrait>,
        notifier: Arc<dyn NotifierTrait>,
    ) -> Self {
        Self {
            applications,
            users,
            notifier,
        }
    }
}

#[async_trait::async_trait]
impl HostServiceTrait for HostService {
    async fn apply_for_host(&self, new_application: NewHostApplication) -> Result<HostApplication> {
        new_application.validate()?;

        let user = self.users.get_by_id(&new_application.user_id)?;
        if user.role != UserRole::User {
            return Err(Error::Precondition(format!(
                "User {} already holds role {}",
                user.id, user.role
            )));
        }

        self.applications.create(new_application).await
    }

    fn list_pending_applications(&self) -> Result<Vec<HostApplication>> {
        self.applications.list_pending()
    }

    fn list_hosts(&self) -> Result<Vec<User>> {
        self.users.list_by_role(UserRole::Host)
    }

    async fn approve_application(&self, application_id: &str) -> Result<HostApplication> {
        let application = self.applications.get_by_id(application_id)?;
        if application.status != ApplicationStatus::Pending {
            return Err(Error::Precondition(format!(
                "Application {} was already {}",
                application.id, application.status
            )));
        }

        // Decide first (guarded on PENDING), then promote. The conditional
        // decide is what makes two concurrent approvals safe.
        let decided = self
            .applications
            .decide(
                application_id,
                ApplicationStatus::Approved,
                Utc::now().naive_utc(),
            )
            .await?;
        let user = self
            .users
            .set_role(&decided.user_id, UserRole::Host)
            .await?;
        debug!("Approved host application {} for user {}", decided.id, user.id);

        notify_best_effort(
            &self.notifier,
            Notice::ApplicationApproved {
                user_email: user.email,
            },
        )
        .await;

        Ok(decided)
    }

    async fn reject_application(
        &self,
        application_id: &str,
        reason: Option<String>,
    ) -> Result<HostApplication> {
        let decided = self
            .applications
            .decide(
                application_id,
                ApplicationStatus::Rejected,
                Utc::now().naive_utc(),
            )
            .await?;
        let user = self.users.get_by_id(&decided.user_id)?;

        notify_best_effort(
            &self.notifier,
            Notice::ApplicationRejected {
                user_email: user.email,
                reason,
            },
        )
        .await;

        Ok(decided)
    }
}
