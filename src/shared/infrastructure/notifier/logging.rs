use crate::shared::infrastructure::notifier::{Notification, Notifier};

/// Logs each message the shopper would see.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

#[async_trait::async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, notification: Notification) {
        tracing::warn!(
            text = %notification.message,
            raised_at = notification.raised_at,
            "user notification"
        );
    }
}
