use std::sync::Arc;

use log::debug;

use super::plans_model::{NewTravelPlan, TravelPlan, TravelPlanUpdate};
use super::plans_traits::{PlanRepositoryTrait, PlanServiceTrait};
use crate::errors::Result;
use crate::statuses::PlanStatus;
use crate::Error;

/// Service for managing travel plans.
pub struct PlanService {
    repository: Arc<dyn PlanRepositoryTrait>,
}

impl PlanService {
    /// Creates a new PlanService instance.
    pub fn new(repository: Arc<dyn PlanRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl PlanServiceTrait for PlanService {
    async fn create_plan(&self, new_plan: NewTravelPlan) -> Result<TravelPlan> {
        new_plan.validate()?;
        self.repository.create(new_plan).await
    }

    async fn update_plan(&self, plan_update: TravelPlanUpdate) -> Result<TravelPlan> {
        plan_update.validate()?;
        self.repository.update(plan_update).await
    }

    fn get_plan(&self, plan_id: &str) -> Result<TravelPlan> {
        self.repository.get_by_id(plan_id)
    }

    fn list_host_plans(&self, host_id: &str) -> Result<Vec<TravelPlan>> {
        self.repository.list_for_host(host_id)
    }

    fn list_active_plans(&self) -> Result<Vec<TravelPlan>> {
        self.repository.list_active()
    }

    async fn approve_plan(&self, plan_id: &str) -> Result<TravelPlan> {
        let plan = self.repository.get_by_id(plan_id)?;
        let status = plan.status.transition_to(PlanStatus::Active)?;
        debug!("Approving plan {} ({} -> {})", plan.id, plan.status, status);
        self.repository.set_status(plan_id, status, true).await
    }

    async fn set_plan_active(&self, plan_id: &str, active: bool) -> Result<TravelPlan> {
        let plan = self.repository.get_by_id(plan_id)?;
        if plan.approved_at.is_none() {
            return Err(Error::Precondition(format!(
                "Plan {} has not been approved; only approved plans can be toggled",
                plan.id
            )));
        }

        let target = if active {
            PlanStatus::Active
        } else {
            PlanStatus::Inactive
        };
        let status = plan.status.transition_to(target)?;
        self.repository.set_status(plan_id, status, false).await
    }
}
