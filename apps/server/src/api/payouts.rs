use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};
use wayfare_core::bookings::Booking;
use wayfare_core::payouts::{InstallmentKind, NewPayout, Payout};
use wayfare_core::{errors::ValidationError, Error};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayoutFilter {
    host_id: Option<String>,
}

async fn list_payouts(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<PayoutFilter>,
) -> ApiResult<Json<Vec<Payout>>> {
    let payouts = match filter.host_id {
        Some(host_id) => state.payout_service.list_host_payouts(&host_id)?,
        None => state.payout_service.list_payouts()?,
    };
    Ok(Json(payouts))
}

async fn create_payout(
    State(state): State<Arc<AppState>>,
    Json(new_payout): Json<NewPayout>,
) -> ApiResult<Json<Payout>> {
    let payout = state.payout_service.create_payout(new_payout).await?;
    Ok(Json(payout))
}

async fn get_payout(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Payout>> {
    Ok(Json(state.payout_service.get_payout(&id)?))
}

async fn bookings_needing_payout(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Booking>>> {
    Ok(Json(state.payout_service.bookings_needing_payout()?))
}

async fn mark_installment_paid(
    Path((id, kind)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Payout>> {
    let kind = InstallmentKind::parse(&kind).ok_or_else(|| {
        Error::Validation(ValidationError::InvalidInput(format!(
            "Unknown installment '{kind}'; expected 'first' or 'second'"
        )))
    })?;
    let payout = state
        .payout_service
        .mark_installment_paid(&id, kind)
        .await?;
    Ok(Json(payout))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/payouts", get(list_payouts).post(create_payout))
        .route("/payouts/needing-payout", get(bookings_needing_payout))
        .route("/payouts/{id}", get(get_payout))
        .route(
            "/payouts/{id}/installments/{kind}/pay",
            post(mark_installment_paid),
        )
}
