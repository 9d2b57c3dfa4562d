use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::travel_plans;

use super::model::TravelPlanDB;
use wayfare_core::errors::Result;
use wayfare_core::plans::{NewTravelPlan, PlanRepositoryTrait, TravelPlan, TravelPlanUpdate};
use wayfare_core::statuses::PlanStatus;

/// Repository for managing travel plan data in the database.
pub struct PlanRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PlanRepository {
    /// Creates a new PlanRepository instance.
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_plan(conn: &mut SqliteConnection, plan_id: &str) -> Result<TravelPlan> {
    travel_plans::table
        .find(plan_id)
        .select(TravelPlanDB::as_select())
        .first::<TravelPlanDB>(conn)
        .into_core()?
        .into_domain()
}

#[async_trait]
impl PlanRepositoryTrait for PlanRepository {
    async fn create(&self, new_plan: NewTravelPlan) -> Result<TravelPlan> {
        let now = Utc::now().naive_utc();
        let row = TravelPlanDB {
            id: new_plan
                .id
                .clone()
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            host_id: new_plan.host_id,
            title: new_plan.title,
            description: new_plan.description,
            country: new_plan.country,
            state: new_plan.state,
            city: new_plan.city,
            no_of_days: new_plan.no_of_days,
            price: new_plan.price.to_string(),
            max_participants: new_plan.max_participants,
            status: new_plan.status.as_str().to_string(),
            approved_at: None,
            day_wise: TravelPlanDB::day_wise_json(&new_plan.day_wise)?,
            created_at: now,
            updated_at: now,
        };

        self.writer
            .exec(move |conn| {
                diesel::insert_into(travel_plans::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                load_plan(conn, &row.id)
            })
            .await
    }

    async fn update(&self, plan_update: TravelPlanUpdate) -> Result<TravelPlan> {
        let day_wise = TravelPlanDB::day_wise_json(&plan_update.day_wise)?;
        self.writer
            .exec(move |conn| {
                let plan_id = plan_update.id.clone();
                diesel::update(travel_plans::table.filter(travel_plans::id.eq(&plan_id)))
                    .set((
                        travel_plans::title.eq(plan_update.title),
                        travel_plans::description.eq(plan_update.description),
                        travel_plans::country.eq(plan_update.country),
                        travel_plans::state.eq(plan_update.state),
                        travel_plans::city.eq(plan_update.city),
                        travel_plans::no_of_days.eq(plan_update.no_of_days),
                        travel_plans::price.eq(plan_update.price.to_string()),
                        travel_plans::max_participants.eq(plan_update.max_participants),
                        travel_plans::day_wise.eq(day_wise),
                        travel_plans::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;
                load_plan(conn, &plan_id)
            })
            .await
    }

    fn get_by_id(&self, plan_id: &str) -> Result<TravelPlan> {
        let mut conn = get_connection(&self.pool)?;
        load_plan(&mut conn, plan_id)
    }

    fn list_for_host(&self, host_id: &str) -> Result<Vec<TravelPlan>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = travel_plans::table
            .filter(travel_plans::host_id.eq(host_id))
            .select(TravelPlanDB::as_select())
            .order(travel_plans::created_at.desc())
            .load::<TravelPlanDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(TravelPlanDB::into_domain).collect()
    }

    fn list_active(&self) -> Result<Vec<TravelPlan>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = travel_plans::table
            .filter(travel_plans::status.eq(PlanStatus::Active.as_str()))
            .select(TravelPlanDB::as_select())
            .order(travel_plans::title.asc())
            .load::<TravelPlanDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(TravelPlanDB::into_domain).collect()
    }

    async fn set_status(
        &self,
        plan_id: &str,
        status: PlanStatus,
        mark_approved: bool,
    ) -> Result<TravelPlan> {
        let plan_id = plan_id.to_string();
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                if mark_approved {
                    diesel::update(travel_plans::table.filter(travel_plans::id.eq(&plan_id)))
                        .set((
                            travel_plans::status.eq(status.as_str()),
                            travel_plans::approved_at.eq(Some(now)),
                            travel_plans::updated_at.eq(now),
                        ))
                        .execute(conn)
                        .into_core()?;
                } else {
                    diesel::update(travel_plans::table.filter(travel_plans::id.eq(&plan_id)))
                        .set((
                            travel_plans::status.eq(status.as_str()),
                            travel_plans::updated_at.eq(now),
                        ))
                        .execute(conn)
                        .into_core()?;
                }
                load_plan(conn, &plan_id)
            })
            .await
    }
}
