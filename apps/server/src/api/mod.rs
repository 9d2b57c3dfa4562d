//! HTTP surface: one router per bounded context.

mod bookings;
mod health;
mod hosts;
mod payouts;
mod plans;
mod webhooks;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(bookings::router())
        .merge(payouts::router())
        .merge(plans::router())
        .merge(hosts::router())
        .merge(webhooks::router())
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
