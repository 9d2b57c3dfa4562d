//! Travel plan domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::statuses::PlanStatus;
use crate::{Error, Result};

/// One day of a travel plan's itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub title: String,
    pub description: Option<String>,
    pub activities: Vec<String>,
    pub meals: Vec<String>,
    pub accommodation: Option<String>,
    pub image: Option<String>,
}

/// Domain model representing a host's travel plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPlan {
    pub id: String,
    pub host_id: String,
    pub title: String,
    pub description: Option<String>,
    pub country: String,
    pub state: Option<String>,
    pub city: Option<String>,
    pub no_of_days: i32,
    pub price: Decimal,
    pub max_participants: i32,
    pub status: PlanStatus,
    /// Set once by admin approval; a plan without it cannot self-activate.
    pub approved_at: Option<NaiveDateTime>,
    pub day_wise: Vec<DayPlan>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new travel plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTravelPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub host_id: String,
    pub title: String,
    pub description: Option<String>,
    pub country: String,
    pub state: Option<String>,
    pub city: Option<String>,
    pub no_of_days: i32,
    pub price: Decimal,
    pub max_participants: i32,
    /// DRAFT or INACTIVE; a new plan can never arrive ACTIVE.
    pub status: PlanStatus,
    pub day_wise: Vec<DayPlan>,
}

impl NewTravelPlan {
    /// Validates the new plan data.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Plan title cannot be empty".to_string(),
            )));
        }
        if self.host_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "hostId".to_string(),
            )));
        }
        if self.country.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "country".to_string(),
            )));
        }
        if self.no_of_days < 1 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "A plan must cover at least one day".to_string(),
            )));
        }
        if self.price <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Plan price must be positive".to_string(),
            )));
        }
        if self.max_participants < 1 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Plan must allow at least one participant".to_string(),
            )));
        }
        if self.status == PlanStatus::Active {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "A new plan cannot be created ACTIVE; it needs approval first".to_string(),
            )));
        }
        if !self.day_wise.is_empty() && self.day_wise.len() != self.no_of_days as usize {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Itinerary has {} days but the plan covers {}",
                self.day_wise.len(),
                self.no_of_days
            ))));
        }
        Ok(())
    }
}

/// Input model for updating an existing travel plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPlanUpdate {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub country: String,
    pub state: Option<String>,
    pub city: Option<String>,
    pub no_of_days: i32,
    pub price: Decimal,
    pub max_participants: i32,
    pub day_wise: Vec<DayPlan>,
}

impl TravelPlanUpdate {
    /// Validates the plan update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        if self.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Plan title cannot be empty".to_string(),
            )));
        }
        if self.no_of_days < 1 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "A plan must cover at least one day".to_string(),
            )));
        }
        if self.price <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Plan price must be positive".to_string(),
            )));
        }
        if !self.day_wise.is_empty() && self.day_wise.len() != self.no_of_days as usize {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Itinerary has {} days but the plan covers {}",
                self.day_wise.len(),
                self.no_of_days
            ))));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_plan() -> NewTravelPlan {
        NewTravelPlan {
            id: None,
            host_id: "hst_1".to_string(),
            title: "Backwaters of Kerala".to_string(),
            description: None,
            country: "India".to_string(),
            state: Some("Kerala".to_string()),
            city: Some("Alleppey".to_string()),
            no_of_days: 3,
            price: dec!(14999),
            max_participants: 12,
            status: PlanStatus::Draft,
            day_wise: Vec::new(),
        }
    }

    #[test]
    fn test_valid_plan_passes() {
        assert!(new_plan().validate().is_ok());
    }

    #[test]
    fn test_new_plan_cannot_be_active() {
        let mut plan = new_plan();
        plan.status = PlanStatus::Active;
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_itinerary_length_must_match_days() {
        let mut plan = new_plan();
        plan.day_wise = vec![DayPlan::default(); 2];
        assert!(plan.validate().is_err());
        plan.day_wise = vec![DayPlan::default(); 3];
        assert!(plan.validate().is_ok());
    }
}
