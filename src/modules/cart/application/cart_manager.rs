// The cart manager owns the shopper's cart for the life of the process.
//
// Responsibilities
// - Look up stock and products without holding the cart lock, so a slow lookup stalls only its own operation.
// - Decide against the current cart and commit under the lock, so overlapping operations never lose updates.
// - Write the full snapshot before replacing the in-memory cart, then publish it to subscribers.
// - Signal one user-facing message per failure and return the structured cause to the caller.

use crate::modules::cart::adapters::outbound::cart_snapshot::{CartSnapshotRepository, SnapshotError};
use crate::modules::cart::application::errors::{CartError, CartErrorKind, CartFailure, CartOperation};
use crate::modules::cart::core::cart::Cart;
use crate::modules::cart::core::decision::{DecideError, Decision, ensure_in_stock};
use crate::modules::cart::core::ports::{ProductGateway, StockGateway};
use crate::modules::cart::core::product::ProductId;
use crate::modules::cart::use_cases::add_product::decide::{decide_add, decide_increment};
use crate::modules::cart::use_cases::remove_product::decide::decide_remove;
use crate::modules::cart::use_cases::update_product_amount::command::UpdateProductAmount;
use crate::modules::cart::use_cases::update_product_amount::decide::decide_update;
use crate::shared::infrastructure::notifier::{Notification, Notifier};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

pub struct CartPorts {
    pub stock: Arc<dyn StockGateway>,
    pub products: Arc<dyn ProductGateway>,
    pub snapshots: CartSnapshotRepository,
    pub notifier: Arc<dyn Notifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOutcome {
    Applied,
    /// Nothing changed and nothing was signalled (an amount below one).
    Ignored,
}

pub type CartResult = Result<CartOutcome, CartFailure>;

pub struct CartManager {
    cart: Mutex<Cart>,
    changes: watch::Sender<Cart>,
    stock: Arc<dyn StockGateway>,
    products: Arc<dyn ProductGateway>,
    snapshots: CartSnapshotRepository,
    notifier: Arc<dyn Notifier>,
}

impl CartManager {
    /// Loads the persisted cart. A corrupt snapshot is replaced by an empty cart.
    pub async fn restore(ports: CartPorts) -> Result<Self, SnapshotError> {
        let cart = match ports.snapshots.load().await {
            Ok(cart) => cart,
            Err(SnapshotError::CorruptState(error)) => {
                tracing::warn!(
                    key = ports.snapshots.key(),
                    %error,
                    "persisted cart is corrupt, resetting to an empty cart"
                );
                let empty = Cart::default();
                ports.snapshots.save(&empty).await?;
                empty
            }
            Err(error) => return Err(error),
        };
        tracing::info!(items = cart.len(), "cart restored");

        let (changes, _) = watch::channel(cart.clone());
        Ok(Self {
            cart: Mutex::new(cart),
            changes,
            stock: ports.stock,
            products: ports.products,
            snapshots: ports.snapshots,
            notifier: ports.notifier,
        })
    }

    /// Latest committed cart. Does not wait for an operation in flight.
    pub fn cart(&self) -> Cart {
        self.changes.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.changes.subscribe()
    }

    pub async fn add_product(&self, product_id: ProductId) -> CartResult {
        if self.cart().contains(product_id) {
            let result = self.increment(product_id).await;
            return self
                .settle(CartOperation::UpdateProductAmount, product_id, None, result)
                .await;
        }

        let result = self.add_new(product_id).await;
        self.settle(CartOperation::AddProduct, product_id, Some(1), result)
            .await
    }

    pub async fn remove_product(&self, product_id: ProductId) -> CartResult {
        let result = self
            .commit(|cart| Ok(decide_remove(cart, product_id)))
            .await;
        self.settle(CartOperation::RemoveProduct, product_id, None, result)
            .await
    }

    pub async fn update_product_amount(&self, command: UpdateProductAmount) -> CartResult {
        let result = self.update(command).await;
        self.settle(
            CartOperation::UpdateProductAmount,
            command.product_id,
            Some(command.amount),
            result,
        )
        .await
    }

    async fn add_new(&self, product_id: ProductId) -> Result<CartOutcome, CartError> {
        let stock = self.stock.stock(product_id).await?;
        ensure_in_stock(&stock, 1)?;
        let product = self.products.product(product_id).await?;
        self.commit(|cart| {
            // An overlapping add committed it while the catalog was being read.
            if cart.contains(product_id) {
                let command = decide_increment(cart, product_id)?;
                return Ok(decide_update(cart, &command, &stock));
            }
            Ok(decide_add(cart, product))
        })
        .await
    }

    async fn increment(&self, product_id: ProductId) -> Result<CartOutcome, CartError> {
        let stock = self.stock.stock(product_id).await?;
        self.commit(|cart| {
            let command = decide_increment(cart, product_id)?;
            Ok(decide_update(cart, &command, &stock))
        })
        .await
    }

    async fn update(&self, command: UpdateProductAmount) -> Result<CartOutcome, CartError> {
        if !self.cart().contains(command.product_id) {
            return Err(DecideError::NotInCart {
                product_id: command.product_id,
            }
            .into());
        }
        let stock = self.stock.stock(command.product_id).await?;
        self.commit(|cart| Ok(decide_update(cart, &command, &stock)))
            .await
    }

    /// Decides against the current cart and writes the result through, under the cart lock.
    async fn commit<F>(&self, decide: F) -> Result<CartOutcome, CartError>
    where
        F: FnOnce(&Cart) -> Result<Decision, DecideError>,
    {
        let mut cart = self.cart.lock().await;
        match decide(&cart)? {
            Decision::Accepted { cart: next } => {
                self.snapshots.save(&next).await?;
                *cart = next.clone();
                self.changes.send_replace(next);
                Ok(CartOutcome::Applied)
            }
            Decision::Rejected { reason } => Err(reason.into()),
            Decision::Ignored => Ok(CartOutcome::Ignored),
        }
    }

    async fn settle(
        &self,
        operation: CartOperation,
        product_id: ProductId,
        amount: Option<i64>,
        result: Result<CartOutcome, CartError>,
    ) -> CartResult {
        match result {
            Ok(CartOutcome::Applied) => {
                tracing::info!(operation = operation.as_str(), product_id, amount, "cart updated");
                Ok(CartOutcome::Applied)
            }
            Ok(CartOutcome::Ignored) => {
                tracing::debug!(
                    operation = operation.as_str(),
                    product_id,
                    amount,
                    "cart left unchanged"
                );
                Ok(CartOutcome::Ignored)
            }
            Err(error) => {
                let failure = CartFailure::new(operation, error);
                match failure.kind() {
                    CartErrorKind::Unexpected => tracing::error!(
                        operation = operation.as_str(),
                        product_id,
                        amount,
                        error = %failure.source,
                        "cart operation failed"
                    ),
                    kind => tracing::warn!(
                        operation = operation.as_str(),
                        product_id,
                        amount,
                        ?kind,
                        error = %failure.source,
                        "cart operation rejected"
                    ),
                }
                self.notifier
                    .notify(Notification::error(failure.user_message()))
                    .await;
                Err(failure)
            }
        }
    }
}

#[cfg(test)]
mod cart_manager_tests {
    use super::*;
    use crate::modules::cart::adapters::outbound::cart_snapshot::CART_STORAGE_KEY;
    use crate::modules::cart::adapters::outbound::in_memory_catalog::InMemoryCatalog;
    use crate::modules::cart::application::errors::OUT_OF_STOCK_MESSAGE;
    use crate::modules::cart::core::ports::GatewayError;
    use crate::modules::cart::core::product::Stock;
    use crate::shared::infrastructure::key_value_store::KeyValueStore;
    use crate::shared::infrastructure::key_value_store::in_memory::InMemoryKeyValueStore;
    use crate::shared::infrastructure::notifier::in_memory::InMemoryNotifier;
    use crate::test_support::fixtures::{CartHarness, CartHarnessBuilder, cart_item};
    use rstest::{fixture, rstest};
    use std::time::Duration;

    /// Stock lookups that never answer.
    struct HangingStock;

    #[async_trait::async_trait]
    impl StockGateway for HangingStock {
        async fn stock(&self, _product_id: ProductId) -> Result<Stock, GatewayError> {
            std::future::pending().await
        }
    }

    #[fixture]
    fn builder() -> CartHarnessBuilder {
        CartHarnessBuilder::new()
            .product(1, 2)
            .product(2, 5)
            .product(3, 0)
    }

    async fn persisted(harness: &CartHarness) -> Cart {
        let raw = harness
            .store
            .get(harness.key())
            .await
            .expect("get failed")
            .expect("snapshot missing");
        serde_json::from_str(&raw).expect("snapshot does not decode")
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_add_a_new_product_with_an_amount_of_one(builder: CartHarnessBuilder) {
        let harness = builder.build().await;

        let outcome = harness.manager.add_product(1).await.expect("add failed");

        assert_eq!(outcome, CartOutcome::Applied);
        let cart = harness.manager.cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.find(1).map(|i| i.amount), Some(1));
        assert_eq!(persisted(&harness).await, cart);
        assert!(harness.notifier.messages().await.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_increment_a_product_already_in_the_cart(builder: CartHarnessBuilder) {
        let harness = builder.in_cart(cart_item(2, 1)).build().await;

        harness.manager.add_product(2).await.expect("add failed");

        assert_eq!(harness.manager.cart().find(2).map(|i| i.amount), Some(2));
        assert_eq!(harness.catalog.product_lookups(), 0);
        assert_eq!(persisted(&harness).await, harness.manager.cart());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refuse_to_increment_past_the_stock(builder: CartHarnessBuilder) {
        let harness = builder.in_cart(cart_item(1, 2)).build().await;
        let before = harness.manager.cart();

        let failure = harness.manager.add_product(1).await.expect_err("add should fail");

        assert_eq!(failure.kind(), CartErrorKind::OutOfStock);
        assert_eq!(failure.operation, CartOperation::UpdateProductAmount);
        assert_eq!(harness.manager.cart(), before);
        assert_eq!(harness.notifier.messages().await, vec![OUT_OF_STOCK_MESSAGE.to_string()]);
        assert_eq!(harness.store.writes(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refuse_a_new_product_without_stock(builder: CartHarnessBuilder) {
        let harness = builder.build().await;

        let failure = harness.manager.add_product(3).await.expect_err("add should fail");

        assert_eq!(failure.kind(), CartErrorKind::OutOfStock);
        assert!(harness.manager.cart().is_empty());
        assert_eq!(harness.catalog.product_lookups(), 0);
        assert_eq!(harness.notifier.messages().await, vec![OUT_OF_STOCK_MESSAGE.to_string()]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_signal_a_generic_error_when_the_catalog_is_down(builder: CartHarnessBuilder) {
        let harness = builder.build().await;
        harness.catalog.toggle_offline();

        let failure = harness.manager.add_product(1).await.expect_err("add should fail");

        assert!(matches!(
            failure.source,
            CartError::Gateway(GatewayError::Transport(_))
        ));
        assert!(harness.manager.cart().is_empty());
        assert_eq!(
            harness.notifier.messages().await,
            vec!["error adding product".to_string()]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_signal_a_generic_error_when_the_product_is_unknown() {
        let harness = CartHarnessBuilder::new().stock_only(8, 4).build().await;

        let failure = harness.manager.add_product(8).await.expect_err("add should fail");

        assert!(matches!(
            failure.source,
            CartError::Gateway(GatewayError::NotFound { resource: "product", .. })
        ));
        assert_eq!(failure.user_message(), "error adding product");
        assert!(harness.manager.cart().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_remove_a_product(builder: CartHarnessBuilder) {
        let harness = builder
            .in_cart(cart_item(1, 1))
            .in_cart(cart_item(2, 3))
            .build()
            .await;

        harness.manager.remove_product(1).await.expect("remove failed");

        let cart = harness.manager.cart();
        assert!(!cart.contains(1));
        assert_eq!(cart.len(), 1);
        assert_eq!(persisted(&harness).await, cart);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_signal_when_removing_twice(builder: CartHarnessBuilder) {
        let harness = builder.in_cart(cart_item(1, 1)).build().await;
        harness.manager.remove_product(1).await.expect("remove failed");
        let before = harness.manager.cart();

        let failure = harness
            .manager
            .remove_product(1)
            .await
            .expect_err("second remove should fail");

        assert_eq!(failure.kind(), CartErrorKind::NotInCart);
        assert_eq!(harness.manager.cart(), before);
        assert_eq!(
            harness.notifier.messages().await,
            vec!["error removing product".to_string()]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_update_the_amount_within_stock(builder: CartHarnessBuilder) {
        let harness = builder.in_cart(cart_item(2, 1)).build().await;

        let outcome = harness
            .manager
            .update_product_amount(UpdateProductAmount { product_id: 2, amount: 5 })
            .await
            .expect("update failed");

        assert_eq!(outcome, CartOutcome::Applied);
        assert_eq!(harness.manager.cart().find(2).map(|i| i.amount), Some(5));
        assert_eq!(persisted(&harness).await, harness.manager.cart());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refuse_an_amount_above_stock(builder: CartHarnessBuilder) {
        let harness = builder.in_cart(cart_item(2, 1)).build().await;
        let before = harness.manager.cart();

        let failure = harness
            .manager
            .update_product_amount(UpdateProductAmount { product_id: 2, amount: 6 })
            .await
            .expect_err("update should fail");

        assert!(matches!(
            failure.source,
            CartError::Rejected(DecideError::OutOfStock {
                requested: 6,
                available: 5,
                ..
            })
        ));
        assert_eq!(harness.manager.cart(), before);
        assert_eq!(harness.notifier.messages().await, vec![OUT_OF_STOCK_MESSAGE.to_string()]);
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[tokio::test]
    async fn it_should_silently_ignore_an_amount_below_one(
        builder: CartHarnessBuilder,
        #[case] amount: i64,
    ) {
        let harness = builder.in_cart(cart_item(2, 3)).build().await;
        let before = harness.manager.cart();

        let outcome = harness
            .manager
            .update_product_amount(UpdateProductAmount { product_id: 2, amount })
            .await
            .expect("update should not fail");

        assert_eq!(outcome, CartOutcome::Ignored);
        assert_eq!(harness.manager.cart(), before);
        assert!(harness.notifier.messages().await.is_empty());
        assert_eq!(harness.store.writes(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_signal_when_updating_a_product_not_in_the_cart(builder: CartHarnessBuilder) {
        let harness = builder.build().await;

        let failure = harness
            .manager
            .update_product_amount(UpdateProductAmount { product_id: 1, amount: 1 })
            .await
            .expect_err("update should fail");

        assert_eq!(failure.kind(), CartErrorKind::NotInCart);
        assert_eq!(harness.catalog.stock_lookups(), 0);
        assert_eq!(
            harness.notifier.messages().await,
            vec!["error updating product quantity".to_string()]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_keep_the_cart_when_the_snapshot_cannot_be_written(
        builder: CartHarnessBuilder,
    ) {
        let harness = builder.build().await;
        harness.store.toggle_offline();

        let failure = harness.manager.add_product(1).await.expect_err("add should fail");

        assert!(matches!(failure.source, CartError::Snapshot(_)));
        assert!(harness.manager.cart().is_empty());
        assert_eq!(
            harness.notifier.messages().await,
            vec!["error adding product".to_string()]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_restore_the_persisted_cart(builder: CartHarnessBuilder) {
        let harness = builder
            .in_cart(cart_item(1, 2))
            .in_cart(cart_item(2, 4))
            .build()
            .await;

        assert_eq!(
            harness.manager.cart(),
            Cart::from_items(vec![cart_item(1, 2), cart_item(2, 4)])
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reset_a_corrupt_snapshot_to_an_empty_cart(builder: CartHarnessBuilder) {
        let harness = builder.raw_snapshot("{definitely not a cart").build().await;

        assert!(harness.manager.cart().is_empty());
        assert_eq!(persisted(&harness).await, Cart::default());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_publish_committed_carts_to_subscribers(builder: CartHarnessBuilder) {
        let harness = builder.build().await;
        let mut changes = harness.manager.subscribe();

        harness.manager.add_product(2).await.expect("add failed");

        changes.changed().await.expect("sender dropped");
        assert_eq!(changes.borrow_and_update().find(2).map(|i| i.amount), Some(1));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_not_lose_updates_from_overlapping_operations(builder: CartHarnessBuilder) {
        let harness = builder.build().await;

        let (first, second) = tokio::join!(
            harness.manager.add_product(2),
            harness.manager.add_product(2)
        );

        assert!(first.is_ok() && second.is_ok());
        assert_eq!(harness.manager.cart().find(2).map(|i| i.amount), Some(2));
        assert_eq!(persisted(&harness).await, harness.manager.cart());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refuse_to_increment_past_the_largest_amount() {
        let harness = CartHarnessBuilder::new()
            .product(2, i64::MAX)
            .in_cart(cart_item(2, i64::MAX))
            .build()
            .await;
        let before = harness.manager.cart();

        let failure = harness.manager.add_product(2).await.expect_err("add should fail");

        assert!(matches!(
            failure.source,
            CartError::Rejected(DecideError::AmountOverflow { product_id: 2 })
        ));
        assert_eq!(failure.user_message(), "error updating product quantity");
        assert_eq!(harness.manager.cart(), before);
        assert_eq!(harness.store.writes(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_not_stall_other_operations_behind_a_hanging_lookup() {
        let snapshot = serde_json::to_string(&Cart::from_items(vec![cart_item(2, 1)]))
            .expect("encode failed");
        let store = Arc::new(InMemoryKeyValueStore::with_entry(CART_STORAGE_KEY, snapshot));
        let manager = Arc::new(
            CartManager::restore(CartPorts {
                stock: Arc::new(HangingStock),
                products: Arc::new(InMemoryCatalog::new()),
                snapshots: CartSnapshotRepository::new(store, CART_STORAGE_KEY),
                notifier: Arc::new(InMemoryNotifier::new()),
            })
            .await
            .expect("restore failed"),
        );
        let stalled = tokio::spawn({
            let manager = manager.clone();
            async move { manager.add_product(1).await }
        });
        tokio::task::yield_now().await;

        let removed = tokio::time::timeout(Duration::from_secs(1), manager.remove_product(2)).await;

        assert!(matches!(removed, Ok(Ok(CartOutcome::Applied))));
        assert!(manager.cart().is_empty());
        assert!(!stalled.is_finished());
        stalled.abort();
    }
}
