//! Travel plan approval and host-toggle rules over an in-memory repository.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal_macros::dec;

use wayfare_core::plans::{
    NewTravelPlan, PlanRepositoryTrait, PlanService, PlanServiceTrait, TravelPlan,
    TravelPlanUpdate,
};
use wayfare_core::statuses::PlanStatus;
use wayfare_core::{errors::DatabaseError, Error, Result};

#[derive(Default)]
struct InMemoryPlanRepository {
    plans: Mutex<HashMap<String, TravelPlan>>,
}

#[async_trait]
impl PlanRepositoryTrait for InMemoryPlanRepository {
    async fn create(&self, new_plan: NewTravelPlan) -> Result<TravelPlan> {
        let now = Utc::now().naive_utc();
        let plan = TravelPlan {
            id: new_plan
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            host_id: new_plan.host_id,
            title: new_plan.title,
            description: new_plan.description,
            country: new_plan.country,
            state: new_plan.state,
            city: new_plan.city,
            no_of_days: new_plan.no_of_days,
            price: new_plan.price,
            max_participants: new_plan.max_participants,
            status: new_plan.status,
            approved_at: None,
            day_wise: new_plan.day_wise,
            created_at: now,
            updated_at: now,
        };
        self.plans
            .lock()
            .unwrap()
            .insert(plan.id.clone(), plan.clone());
        Ok(plan)
    }

    async fn update(&self, plan_update: TravelPlanUpdate) -> Result<TravelPlan> {
        let mut plans = self.plans.lock().unwrap();
        let plan = plans
            .get_mut(&plan_update.id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(plan_update.id.clone())))?;
        plan.title = plan_update.title;
        plan.no_of_days = plan_update.no_of_days;
        plan.price = plan_update.price;
        plan.day_wise = plan_update.day_wise;
        plan.updated_at = Utc::now().naive_utc();
        Ok(plan.clone())
    }

    fn get_by_id(&self, plan_id: &str) -> Result<TravelPlan> {
        self.plans
            .lock()
            .unwrap()
            .get(plan_id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(plan_id.to_string())))
    }

    fn list_for_host(&self, host_id: &str) -> Result<Vec<TravelPlan>> {
        Ok(self
            .plans
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.host_id == host_id)
            .cloned()
            .collect())
    }

    fn list_active(&self) -> Result<Vec<TravelPlan>> {
        Ok(self
            .plans
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.status == PlanStatus::Active)
            .cloned()
            .collect())
    }

    async fn set_status(
        &self,
        plan_id: &str,
        status: PlanStatus,
        mark_approved: bool,
    ) -> Result<TravelPlan> {
        let mut plans = self.plans.lock().unwrap();
        let plan = plans
            .get_mut(plan_id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(plan_id.to_string())))?;
        plan.status = status;
        if mark_approved {
            plan.approved_at = Some(Utc::now().naive_utc());
        }
        plan.updated_at = Utc::now().naive_utc();
        Ok(plan.clone())
    }
}

fn service() -> PlanService {
    PlanService::new(Arc::new(InMemoryPlanRepository::default()))
}

fn draft_plan() -> NewTravelPlan {
    NewTravelPlan {
        id: None,
        host_id: "hst_1".to_string(),
        title: "Spiti Valley Circuit".to_string(),
        description: None,
        country: "India".to_string(),
        state: Some("Himachal Pradesh".to_string()),
        city: None,
        no_of_days: 7,
        price: dec!(32000),
        max_participants: 10,
        status: PlanStatus::Draft,
        day_wise: Vec::new(),
    }
}

#[tokio::test]
async fn unapproved_plan_cannot_be_host_toggled() {
    let service = service();
    let plan = service.create_plan(draft_plan()).await.unwrap();
    assert_eq!(plan.status, PlanStatus::Draft);
    assert!(plan.approved_at.is_none());

    let err = service.set_plan_active(&plan.id, true).await.unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));
}

#[tokio::test]
async fn approval_activates_and_enables_the_toggle() {
    let service = service();
    let plan = service.create_plan(draft_plan()).await.unwrap();

    let approved = service.approve_plan(&plan.id).await.unwrap();
    assert_eq!(approved.status, PlanStatus::Active);
    assert!(approved.approved_at.is_some());
    assert_eq!(service.list_active_plans().unwrap().len(), 1);

    // Host parks the plan, then brings it back.
    let parked = service.set_plan_active(&plan.id, false).await.unwrap();
    assert_eq!(parked.status, PlanStatus::Inactive);
    assert!(service.list_active_plans().unwrap().is_empty());

    let live = service.set_plan_active(&plan.id, true).await.unwrap();
    assert_eq!(live.status, PlanStatus::Active);
}

#[tokio::test]
async fn double_approval_is_rejected() {
    let service = service();
    let plan = service.create_plan(draft_plan()).await.unwrap();
    service.approve_plan(&plan.id).await.unwrap();

    let err = service.approve_plan(&plan.id).await.unwrap_err();
    assert!(matches!(err, Error::Transition(_)));
}

#[tokio::test]
async fn new_plan_cannot_arrive_active() {
    let service = service();
    let mut plan = draft_plan();
    plan.status = PlanStatus::Active;
    let err = service.create_plan(plan).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}
