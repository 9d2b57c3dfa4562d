//! Travel plan repository and service traits.

use async_trait::async_trait;

use super::plans_model::{NewTravelPlan, TravelPlan, TravelPlanUpdate};
use crate::errors::Result;
use crate::statuses::PlanStatus;

/// Trait defining the contract for TravelPlan repository operations.
#[async_trait]
pub trait PlanRepositoryTrait: Send + Sync {
    /// Creates a new travel plan.
    async fn create(&self, new_plan: NewTravelPlan) -> Result<TravelPlan>;

    /// Updates an existing travel plan's content fields.
    async fn update(&self, plan_update: TravelPlanUpdate) -> Result<TravelPlan>;

    /// Retrieves a plan by its ID.
    fn get_by_id(&self, plan_id: &str) -> Result<TravelPlan>;

    /// Lists one host's plans.
    fn list_for_host(&self, host_id: &str) -> Result<Vec<TravelPlan>>;

    /// Lists plans travelers can book.
    fn list_active(&self) -> Result<Vec<TravelPlan>>;

    /// Sets the plan status; `mark_approved` also stamps `approved_at`.
    async fn set_status(
        &self,
        plan_id: &str,
        status: PlanStatus,
        mark_approved: bool,
    ) -> Result<TravelPlan>;
}

/// Trait defining the contract for TravelPlan service operations.
#[async_trait]
pub trait PlanServiceTrait: Send + Sync {
    /// Creates a plan (DRAFT or INACTIVE) with business validation.
    async fn create_plan(&self, new_plan: NewTravelPlan) -> Result<TravelPlan>;

    /// Updates a plan's content.
    async fn update_plan(&self, plan_update: TravelPlanUpdate) -> Result<TravelPlan>;

    /// Retrieves a plan by ID.
    fn get_plan(&self, plan_id: &str) -> Result<TravelPlan>;

    /// Lists one host's plans.
    fn list_host_plans(&self, host_id: &str) -> Result<Vec<TravelPlan>>;

    /// Lists bookable plans.
    fn list_active_plans(&self) -> Result<Vec<TravelPlan>>;

    /// Admin approval: the only way a plan first becomes ACTIVE.
    async fn approve_plan(&self, plan_id: &str) -> Result<TravelPlan>;

    /// Host toggle between ACTIVE and INACTIVE for an approved plan.
    async fn set_plan_active(&self, plan_id: &str, active: bool) -> Result<TravelPlan>;
}
