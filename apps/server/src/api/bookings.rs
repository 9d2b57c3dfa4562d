use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};
use wayfare_core::bookings::{Booking, BookingSummary, NewBooking, RefundQuote};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingFilter {
    user_id: Option<String>,
    host_id: Option<String>,
}

async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<BookingFilter>,
) -> ApiResult<Json<Vec<Booking>>> {
    let bookings = match (filter.user_id, filter.host_id) {
        (Some(user_id), _) => state.booking_service.list_user_bookings(&user_id)?,
        (None, Some(host_id)) => state.booking_service.list_host_bookings(&host_id)?,
        (None, None) => state.booking_service.list_bookings()?,
    };
    Ok(Json(bookings))
}

async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(new_booking): Json<NewBooking>,
) -> ApiResult<Json<Booking>> {
    let booking = state.booking_service.create_booking(new_booking).await?;
    Ok(Json(booking))
}

async fn get_booking(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Booking>> {
    Ok(Json(state.booking_service.get_booking(&id)?))
}

async fn booking_summary(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<BookingFilter>,
) -> ApiResult<Json<BookingSummary>> {
    let summary = match filter.host_id {
        Some(host_id) => state.booking_service.host_booking_summary(&host_id)?,
        None => state.booking_service.booking_summary()?,
    };
    Ok(Json(summary))
}

async fn refund_quote(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<RefundQuote>> {
    Ok(Json(state.booking_service.quote_refund(&id)?))
}

async fn cancel_booking(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Booking>> {
    let booking = state.booking_service.cancel_booking(&id).await?;
    Ok(Json(booking))
}

async fn mark_refunded(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Booking>> {
    let booking = state.booking_service.mark_refunded(&id).await?;
    Ok(Json(booking))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings/summary", get(booking_summary))
        .route("/bookings/{id}", get(get_booking))
        .route("/bookings/{id}/refund-quote", get(refund_quote))
        .route("/bookings/{id}/cancel", post(cancel_booking))
        .route("/bookings/{id}/refund", post(mark_refunded))
}
