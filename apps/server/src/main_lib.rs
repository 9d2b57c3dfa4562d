use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use wayfare_core::bookings::{BookingService, BookingServiceTrait};
use wayfare_core::hosts::{HostService, HostServiceTrait};
use wayfare_core::notifications::{LogNotifier, NotifierTrait, WebhookNotifier};
use wayfare_core::payouts::{PayoutService, PayoutServiceTrait};
use wayfare_core::plans::{PlanService, PlanServiceTrait};
use wayfare_storage_sqlite::bookings::BookingRepository;
use wayfare_storage_sqlite::hosts::{HostApplicationRepository, UserRepository};
use wayfare_storage_sqlite::payouts::PayoutRepository;
use wayfare_storage_sqlite::plans::PlanRepository;
use wayfare_storage_sqlite::{create_pool, init, run_migrations, spawn_writer};

pub struct AppState {
    pub booking_service: Arc<dyn BookingServiceTrait + Send + Sync>,
    pub payout_service: Arc<dyn PayoutServiceTrait + Send + Sync>,
    pub plan_service: Arc<dyn PlanServiceTrait + Send + Sync>,
    pub host_service: Arc<dyn HostServiceTrait + Send + Sync>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("WY_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let notifier: Arc<dyn NotifierTrait> = match &config.notify_webhook_url {
        Some(url) => Arc::new(WebhookNotifier::new(url.clone())),
        None => Arc::new(LogNotifier),
    };

    let booking_repo = Arc::new(BookingRepository::new(pool.clone(), writer.clone()));
    let payout_repo = Arc::new(PayoutRepository::new(pool.clone(), writer.clone()));
    let plan_repo = Arc::new(PlanRepository::new(pool.clone(), writer.clone()));
    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let application_repo = Arc::new(HostApplicationRepository::new(pool.clone(), writer.clone()));

    let booking_service = Arc::new(BookingService::new(booking_repo.clone(), notifier.clone()));
    let payout_service = Arc::new(PayoutService::new(payout_repo, booking_repo));
    let plan_service = Arc::new(PlanService::new(plan_repo));
    let host_service = Arc::new(HostService::new(application_repo, user_repo, notifier));

    Ok(Arc::new(AppState {
        booking_service,
        payout_service,
        plan_service,
        host_service,
        db_path,
    }))
}
