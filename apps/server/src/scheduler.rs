//! Background scheduler for the overdue payment sweep.
//!
//! The read path already re-evaluates lapsed deadlines, so the sweep's only
//! job is to persist OVERDUE so stored rows and filtered queries converge.
//! Running it twice is harmless: flipped rows no longer match the guard.

use std::sync::Arc;

use tokio::time::{interval, Duration};
use tracing::{info, warn};

use crate::main_lib::AppState;

/// Initial delay before the first sweep, to let the server fully start.
const INITIAL_DELAY_SECS: u64 = 30;

/// Starts the background overdue sweep scheduler.
pub fn start_overdue_sweep_scheduler(state: Arc<AppState>, sweep_interval_secs: u64) {
    tokio::spawn(async move {
        info!("Overdue sweep scheduler started ({sweep_interval_secs}s interval)");

        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        let mut sweep_interval = interval(Duration::from_secs(sweep_interval_secs));
        loop {
            sweep_interval.tick().await;
            match state.booking_service.sweep_overdue().await {
                Ok(0) => {}
                Ok(flipped) => info!("Overdue sweep marked {flipped} bookings"),
                Err(e) => warn!("Overdue sweep failed: {e}"),
            }
        }
    });
}
