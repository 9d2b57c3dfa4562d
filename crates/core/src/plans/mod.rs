//! Travel plans module - domain models, services, and traits.

mod plans_model;
mod plans_service;
mod plans_traits;

pub use plans_model::{DayPlan, NewTravelPlan, TravelPlan, TravelPlanUpdate};
pub use plans_service::PlanService;
pub use plans_traits::{PlanRepositoryTrait, PlanServiceTrait};
