pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::sync::Arc;

use models::{
    cart::Cart,
    outcome::{CartMessage, CartOutcome, UpdateProductAmount},
    product::ProductId,
    settings::CartSettings,
};
use providers::{
    http_catalog::HttpCatalogProvider,
    traits::{CatalogProvider, Notifier},
    tracing_notifier::TracingNotifier,
};
use services::cart_service::{AddStep, CartService, Plan};
use storage::{slot::CartSlot, traits::KeyValueStore};
use tokio::sync::{watch, Mutex};
use tracing::{debug, instrument, warn};

use errors::CartError;

/// Main entry point for the cart core library.
///
/// Owns the current cart revision, checks every quantity change against the
/// remote stock, and keeps the persistence slot in step with memory: a new
/// revision is written to the slot first and only becomes current once the
/// write succeeded.
///
/// Mutations are serialized: each one holds the store's mutation lock from
/// its first remote call until its commit, so two overlapping `add_product`
/// calls for the same id add two units instead of losing one. Reads never
/// wait on the lock and see the last committed revision.
#[must_use]
pub struct CartStore {
    catalog: Box<dyn CatalogProvider>,
    notifier: Box<dyn Notifier>,
    slot: CartSlot,
    cart_service: CartService,
    settings: CartSettings,
    state: watch::Sender<Arc<Cart>>,
    mutation: Mutex<()>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("catalog", &self.catalog.name())
            .field("storage_key", &self.slot.key())
            .field("stock_policy", &self.cart_service.policy())
            .field("lines", &self.state.borrow().len())
            .finish()
    }
}

impl CartStore {
    /// Build a store from explicit collaborators.
    /// The initial cart is read from `storage` under `settings.storage_key`.
    pub fn new(
        catalog: Box<dyn CatalogProvider>,
        storage: Box<dyn KeyValueStore>,
        notifier: Box<dyn Notifier>,
        settings: CartSettings,
    ) -> Self {
        let slot = CartSlot::new(storage, settings.storage_key.clone());
        let initial = slot.load();
        let (state, _) = watch::channel(Arc::new(initial));

        Self {
            catalog,
            notifier,
            slot,
            cart_service: CartService::new(settings.stock_policy),
            settings,
            state,
            mutation: Mutex::new(()),
        }
    }

    /// Build a store talking to the HTTP catalog at `settings.api_base_url`
    /// and reporting messages through `tracing`.
    pub fn from_settings(
        settings: CartSettings,
        storage: Box<dyn KeyValueStore>,
    ) -> Result<Self, CartError> {
        settings.validate()?;
        let catalog = HttpCatalogProvider::new(&settings);
        Ok(Self::new(
            Box::new(catalog),
            storage,
            Box::new(TracingNotifier),
            settings,
        ))
    }

    // ── Reads ───────────────────────────────────────────────────────

    /// The current cart revision. The snapshot never changes; later
    /// mutations publish new revisions instead.
    pub fn cart(&self) -> Arc<Cart> {
        self.state.borrow().clone()
    }

    /// Receiver notified after every committed revision, for UI re-renders.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.state.subscribe()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn cart_size(&self) -> usize {
        self.state.borrow().len()
    }

    #[must_use]
    pub fn settings(&self) -> &CartSettings {
        &self.settings
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Add one unit of a product.
    ///
    /// A product already in the cart goes through the quantity update path
    /// (stock is fetched again there). A new product gets its catalog entry
    /// fetched and is appended with amount 1.
    #[instrument(skip(self))]
    pub async fn add_product(&self, product_id: ProductId) -> CartOutcome {
        let _guard = self.mutation.lock().await;
        let (outcome, failure) = self.add_locked(product_id).await;
        self.report(&outcome, failure);
        outcome
    }

    /// Remove a product's line. Removing a product that is not in the cart
    /// is not an error and yields [`CartOutcome::NotInCart`].
    #[instrument(skip(self))]
    pub async fn remove_product(&self, product_id: ProductId) -> CartOutcome {
        let _guard = self.mutation.lock().await;
        let current = self.cart();
        let outcome = self
            .execute(self.cart_service.plan_remove(&current, product_id))
            .unwrap_or_else(CartOutcome::Failed);
        self.report(&outcome, CartMessage::RemoveFailed);
        outcome
    }

    /// Set a line to an absolute quantity, if stock allows it.
    #[instrument(skip(self))]
    pub async fn update_product_amount(&self, request: UpdateProductAmount) -> CartOutcome {
        let _guard = self.mutation.lock().await;
        let outcome = self
            .update_locked(request.product_id, request.amount)
            .await
            .unwrap_or_else(CartOutcome::Failed);
        self.report(&outcome, CartMessage::UpdateFailed);
        outcome
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Runs an add and returns its outcome together with the message a
    /// failure is reported with. Failures on the increment path come from the
    /// quantity update and are reported as such.
    async fn add_locked(&self, product_id: ProductId) -> (CartOutcome, CartMessage) {
        let stock = match self.catalog.get_stock(product_id).await {
            Ok(stock) => stock,
            Err(e) => return (CartOutcome::Failed(e), CartMessage::AddFailed),
        };
        let current = self.cart();

        match self.cart_service.plan_add(&current, &stock) {
            AddStep::OutOfStock {
                requested,
                available,
            } => (
                CartOutcome::OutOfStock {
                    requested,
                    available,
                },
                CartMessage::AddFailed,
            ),
            AddStep::Increment { amount } => {
                let outcome = self
                    .update_locked(product_id, amount)
                    .await
                    .unwrap_or_else(CartOutcome::Failed);
                (outcome, CartMessage::UpdateFailed)
            }
            AddStep::Append => {
                let outcome = self
                    .append_locked(product_id, &current)
                    .await
                    .unwrap_or_else(CartOutcome::Failed);
                (outcome, CartMessage::AddFailed)
            }
        }
    }

    async fn append_locked(
        &self,
        product_id: ProductId,
        current: &Cart,
    ) -> Result<CartOutcome, CartError> {
        let entry = self.catalog.get_product(product_id).await?;
        self.execute(self.cart_service.plan_append(current, entry))
    }

    async fn update_locked(
        &self,
        product_id: ProductId,
        amount: u32,
    ) -> Result<CartOutcome, CartError> {
        let stock = self.catalog.get_stock(product_id).await?;
        let current = self.cart();
        self.execute(
            self.cart_service
                .plan_update(&current, product_id, amount, &stock),
        )
    }

    fn execute(&self, plan: Plan) -> Result<CartOutcome, CartError> {
        match plan {
            Plan::Skip(outcome) => Ok(outcome),
            Plan::Commit { cart, outcome } => {
                self.commit(cart)?;
                Ok(outcome)
            }
        }
    }

    /// Persist `next`, then make it the current revision.
    fn commit(&self, next: Cart) -> Result<(), CartError> {
        self.slot.save(&next)?;
        let lines = next.len();
        self.state.send_replace(Arc::new(next));
        debug!(lines, "committed cart revision");
        Ok(())
    }

    fn report(&self, outcome: &CartOutcome, failure: CartMessage) {
        match outcome {
            CartOutcome::OutOfStock {
                requested,
                available,
            } => {
                debug!(requested, available, "stock check refused the change");
                self.notifier.error(CartMessage::OutOfStock.as_str());
            }
            CartOutcome::Failed(e) => {
                warn!(error = %e, "cart operation failed");
                self.notifier.error(failure.as_str());
            }
            CartOutcome::NotInCart if failure == CartMessage::UpdateFailed => {
                warn!("quantity update for a product that is not in the cart");
                self.notifier.error(failure.as_str());
            }
            _ => {}
        }
    }
}
