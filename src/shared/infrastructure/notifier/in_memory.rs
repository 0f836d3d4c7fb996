use crate::shared::infrastructure::notifier::{Notification, Notifier};
use std::collections::VecDeque;
use tokio::sync::Mutex;

const DEFAULT_CAPACITY: usize = 100;

/// Keeps the most recent notifications, oldest first.
pub struct InMemoryNotifier {
    capacity: usize,
    notifications: Mutex<VecDeque<Notification>>,
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            notifications: Mutex::new(VecDeque::new()),
        }
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().await.iter().cloned().collect()
    }

    pub async fn messages(&self) -> Vec<String> {
        self.notifications
            .lock()
            .await
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl Notifier for InMemoryNotifier {
    async fn notify(&self, notification: Notification) {
        let mut notifications = self.notifications.lock().await;
        if notifications.len() == self.capacity {
            notifications.pop_front();
        }
        notifications.push_back(notification);
    }
}
