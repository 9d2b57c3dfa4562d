//! Notifier trait and implementations.
//!
//! Notices are fire-and-forget: a delivery failure is logged and surfaced as
//! a warning, never allowed to block or roll back the state transition that
//! produced it.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Outbound notices emitted by core services after successful mutations.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    /// A booking was cancelled and a refund is owed.
    BookingCancelled {
        booking_id: String,
        user_email: String,
        refund_amount: Decimal,
    },

    /// A host application was approved; the user is now a host.
    ApplicationApproved { user_email: String },

    /// A host application was rejected.
    ApplicationRejected {
        user_email: String,
        reason: Option<String>,
    },
}

/// Trait for delivering notices to travelers and hosts.
///
/// Implementations talk to whatever channel is configured (email relay,
/// webhook, nothing). Delivery is best-effort by contract.
#[async_trait]
pub trait NotifierTrait: Send + Sync {
    async fn notify(&self, notice: Notice) -> Result<()>;
}

/// Sends a notice and downgrades any failure to a warning.
///
/// This is the helper services call after a committed state change.
pub async fn notify_best_effort(notifier: &Arc<dyn NotifierTrait>, notice: Notice) {
    if let Err(e) = notifier.notify(notice).await {
        warn!("Notification delivery failed (state change already committed): {e}");
    }
}

/// Notifier that only logs. The default when no relay is configured.
#[derive(Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl NotifierTrait for LogNotifier {
    async fn notify(&self, notice: Notice) -> Result<()> {
        log::info!("notice: {}", serde_json::to_string(&notice)?);
        Ok(())
    }
}

/// Notifier that POSTs the notice as JSON to a configured relay endpoint.
pub struct WebhookNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl WebhookNotifier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl NotifierTrait for WebhookNotifier {
    async fn notify(&self, notice: Notice) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&notice)
            .send()
            .await
            .map_err(|e| Error::Notification(e.to_string()))?;

        response
            .error_for_status()
            .map_err(|e| Error::Notification(e.to_string()))?;
        Ok(())
    }
}

/// Mock notifier for testing - collects delivered notices.
#[derive(Clone, Default)]
pub struct MockNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
    fail: Arc<Mutex<bool>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected notices.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    /// Makes every subsequent delivery fail, for testing the best-effort path.
    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }
}

#[async_trait]
impl NotifierTrait for MockNotifier {
    async fn notify(&self, notice: Notice) -> Result<()> {
        if *self.fail.lock().unwrap() {
            return Err(Error::Notification("mock delivery failure".to_string()));
        }
        self.notices.lock().unwrap().push(notice);
        Ok(())
    }
}
