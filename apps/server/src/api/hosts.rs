use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};
use wayfare_core::hosts::{HostApplication, NewHostApplication, User};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RejectBody {
    reason: Option<String>,
}

async fn apply_for_host(
    State(state): State<Arc<AppState>>,
    Json(new_application): Json<NewHostApplication>,
) -> ApiResult<Json<HostApplication>> {
    let application = state.host_service.apply_for_host(new_application).await?;
    Ok(Json(application))
}

async fn pending_applications(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<HostApplication>>> {
    Ok(Json(state.host_service.list_pending_applications()?))
}

async fn list_hosts(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.host_service.list_hosts()?))
}

async fn approve_application(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<HostApplication>> {
    let application = state.host_service.approve_application(&id).await?;
    Ok(Json(application))
}

async fn reject_application(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<RejectBody>,
) -> ApiResult<Json<HostApplication>> {
    let application = state
        .host_service
        .reject_application(&id, body.reason)
        .await?;
    Ok(Json(application))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/hosts", get(list_hosts))
        .route("/host-applications", post(apply_for_host))
        .route("/host-applications/pending", get(pending_applications))
        .route("/host-applications/{id}/approve", post(approve_application))
        .route("/host-applications/{id}/reject", post(reject_application))
}
