//! Database model for travel plans.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::parse_money;
use wayfare_core::errors::{DatabaseError, Error, Result};
use wayfare_core::plans::{DayPlan, TravelPlan};
use wayfare_core::statuses::PlanStatus;

/// Database model for travel plans. The itinerary is a JSON document.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::travel_plans)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TravelPlanDB {
    pub id: String,
    pub host_id: String,
    pub title: String,
    pub description: Option<String>,
    pub country: String,
    pub state: Option<String>,
    pub city: Option<String>,
    pub no_of_days: i32,
    pub price: String,
    pub max_participants: i32,
    pub status: String,
    pub approved_at: Option<NaiveDateTime>,
    pub day_wise: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TravelPlanDB {
    pub fn into_domain(self) -> Result<TravelPlan> {
        let status = PlanStatus::parse(&self.status).ok_or_else(|| {
            Error::Database(DatabaseError::Internal(format!(
                "Unknown plan status '{}' on plan {}",
                self.status, self.id
            )))
        })?;
        let day_wise: Vec<DayPlan> = match self.day_wise.as_deref() {
            Some(json) if !json.is_empty() => serde_json::from_str(json).map_err(|e| {
                Error::Database(DatabaseError::Internal(format!(
                    "Corrupt itinerary JSON on plan {}: {e}",
                    self.id
                )))
            })?,
            _ => Vec::new(),
        };

        Ok(TravelPlan {
            price: parse_money(&self.price, "travel_plans.price")?,
            id: self.id,
            host_id: self.host_id,
            title: self.title,
            description: self.description,
            country: self.country,
            state: self.state,
            city: self.city,
            no_of_days: self.no_of_days,
            max_participants: self.max_participants,
            status,
            approved_at: self.approved_at,
            day_wise,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }

    pub fn day_wise_json(day_wise: &[DayPlan]) -> Result<Option<String>> {
        if day_wise.is_empty() {
            Ok(None)
        } else {
            Ok(Some(serde_json::to_string(day_wise)?))
        }
    }
}
