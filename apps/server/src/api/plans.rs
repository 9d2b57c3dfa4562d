use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};
use wayfare_core::plans::{NewTravelPlan, TravelPlan, TravelPlanUpdate};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanFilter {
    host_id: Option<String>,
}

async fn list_plans(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<PlanFilter>,
) -> ApiResult<Json<Vec<TravelPlan>>> {
    let plans = match filter.host_id {
        Some(host_id) => state.plan_service.list_host_plans(&host_id)?,
        None => state.plan_service.list_active_plans()?,
    };
    Ok(Json(plans))
}

async fn create_plan(
    State(state): State<Arc<AppState>>,
    Json(new_plan): Json<NewTravelPlan>,
) -> ApiResult<Json<TravelPlan>> {
    Ok(Json(state.plan_service.create_plan(new_plan).await?))
}

async fn update_plan(
    State(state): State<Arc<AppState>>,
    Json(plan_update): Json<TravelPlanUpdate>,
) -> ApiResult<Json<TravelPlan>> {
    Ok(Json(state.plan_service.update_plan(plan_update).await?))
}

async fn get_plan(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TravelPlan>> {
    Ok(Json(state.plan_service.get_plan(&id)?))
}

async fn approve_plan(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TravelPlan>> {
    Ok(Json(state.plan_service.approve_plan(&id).await?))
}

async fn activate_plan(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TravelPlan>> {
    Ok(Json(state.plan_service.set_plan_active(&id, true).await?))
}

async fn deactivate_plan(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TravelPlan>> {
    Ok(Json(state.plan_service.set_plan_active(&id, false).await?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/plans", get(list_plans).post(create_plan).put(update_plan))
        .route("/plans/{id}", get(get_plan))
        .route("/plans/{id}/approve", post(approve_plan))
        .route("/plans/{id}/activate", post(activate_plan))
        .route("/plans/{id}/deactivate", post(deactivate_plan))
}
