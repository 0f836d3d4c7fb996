// Notifier port: the one-way channel carrying user-facing messages.
//
// Purpose
// - Carry what a shopper should see when a cart operation fails. Callers still get a typed result.

pub mod in_memory;
pub mod logging;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub raised_at: i64,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            raised_at: Utc::now().timestamp_millis(),
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification);
}

/// Forwards every notification to each inner notifier in order.
pub struct CompositeNotifier {
    inner: Vec<Arc<dyn Notifier>>,
}

impl CompositeNotifier {
    pub fn new(inner: Vec<Arc<dyn Notifier>>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Notifier for CompositeNotifier {
    async fn notify(&self, notification: Notification) {
        for notifier in &self.inner {
            notifier.notify(notification.clone()).await;
        }
    }
}

#[cfg(test)]
mod composite_notifier_tests {
    use super::in_memory::InMemoryNotifier;
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_forward_to_every_notifier() {
        let first = Arc::new(InMemoryNotifier::new());
        let second = Arc::new(InMemoryNotifier::new());
        let sinks: Vec<Arc<dyn Notifier>> = vec![first.clone(), second.clone()];
        let composite = CompositeNotifier::new(sinks);

        composite.notify(Notification::error("boom")).await;

        assert_eq!(first.messages().await, vec!["boom".to_string()]);
        assert_eq!(second.messages().await, vec!["boom".to_string()]);
    }
}
