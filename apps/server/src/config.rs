//! Server configuration from environment variables.

use std::net::SocketAddr;

/// Runtime configuration, environment-driven with local defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    /// Optional relay endpoint for outbound notices.
    pub notify_webhook_url: Option<String>,
    /// How often the overdue sweep runs.
    pub sweep_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        // Best-effort .env loading for local development.
        let _ = dotenvy::dotenv();

        let listen_addr = std::env::var("WY_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8780".to_string())
            .parse()
            .expect("WY_LISTEN_ADDR must be host:port");
        let db_path =
            std::env::var("WY_DB_PATH").unwrap_or_else(|_| "data/wayfare.db".to_string());
        let notify_webhook_url = std::env::var("WY_NOTIFY_WEBHOOK_URL").ok();
        let sweep_interval_secs = std::env::var("WY_SWEEP_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15 * 60);

        Self {
            listen_addr,
            db_path,
            notify_webhook_url,
            sweep_interval_secs,
        }
    }
}
