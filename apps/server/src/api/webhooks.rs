//! Payment gateway webhook.
//!
//! The gateway is the source of truth for money movement; this endpoint
//! translates its confirmations into payment settlements. Settlement is
//! idempotent at the service layer: a duplicate delivery that would overpay
//! is rejected, not double-applied.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};

use crate::{error::ApiResult, main_lib::AppState};
use wayfare_core::bookings::{Booking, PaymentEvent};

async fn payment_confirmed(
    State(state): State<Arc<AppState>>,
    Json(event): Json<PaymentEvent>,
) -> ApiResult<Json<Booking>> {
    tracing::info!(
        "Payment webhook: booking {} amount {}",
        event.booking_id,
        event.amount_paid
    );
    let booking = state.booking_service.apply_payment(event).await?;
    Ok(Json(booking))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/webhooks/payments", post(payment_confirmed))
}
