use crate::modules::cart::application::cart_manager::CartManager;
use crate::shared::infrastructure::notifier::in_memory::InMemoryNotifier;
use std::sync::Arc;

/// Shared handle every inbound adapter reads the cart through.
#[derive(Clone)]
pub struct AppState {
    pub cart: Arc<CartManager>,
    pub notifications: Arc<InMemoryNotifier>,
}

#[cfg(test)]
impl AppState {
    pub fn from_harness(harness: &crate::test_support::fixtures::CartHarness) -> Self {
        Self {
            cart: harness.manager.clone(),
            notifications: harness.notifier.clone(),
        }
    }
}
