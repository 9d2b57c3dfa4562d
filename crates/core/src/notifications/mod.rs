//! Notifications module - outbound notices and the notifier seam.

mod notifier;

pub use notifier::{
    notify_best_effort, LogNotifier, MockNotifier, Notice, NotifierTrait, WebhookNotifier,
};
