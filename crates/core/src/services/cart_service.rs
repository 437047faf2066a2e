use crate::errors::CartError;
use crate::models::cart::Cart;
use crate::models::outcome::CartOutcome;
use crate::models::product::{CatalogProduct, Product, ProductId};
use crate::models::settings::StockPolicy;
use crate::models::stock::Stock;

/// Next step of an `add_product` once stock is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddStep {
    /// The product is already in the cart; raise its line to `amount`.
    Increment { amount: u32 },
    /// The product is not in the cart yet; fetch its catalog entry and append.
    Append,
    /// Stock does not cover another unit.
    OutOfStock { requested: u32, available: u32 },
}

/// Result of planning a mutation: either a revision to commit, or an outcome
/// that leaves the cart untouched.
#[derive(Debug)]
pub enum Plan {
    Commit { cart: Cart, outcome: CartOutcome },
    Skip(CartOutcome),
}

/// Cart rules: stock checks and revision building.
///
/// Pure business logic — no I/O, no API calls. Easy to test.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartService {
    policy: StockPolicy,
}

impl CartService {
    pub fn new(policy: StockPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> StockPolicy {
        self.policy
    }

    /// Decide what adding one unit of `stock.id` means for `cart`.
    ///
    /// Under `RequestedWithinStock` a product that is not in the cart yet
    /// still needs one unit in stock. `CurrentBelowStock` appends new
    /// products without looking at stock.
    pub fn plan_add(&self, cart: &Cart, stock: &Stock) -> AddStep {
        let current = cart.find(stock.id).map_or(0, |line| line.amount);
        let requested = current.saturating_add(1);

        if current == 0 && self.policy == StockPolicy::CurrentBelowStock {
            return AddStep::Append;
        }

        if !self.policy.allows(current, requested, stock.amount) {
            return AddStep::OutOfStock {
                requested,
                available: stock.amount,
            };
        }

        if current == 0 {
            AddStep::Append
        } else {
            AddStep::Increment { amount: requested }
        }
    }

    /// Append a fresh line for `entry` with amount 1.
    pub fn plan_append(&self, cart: &Cart, entry: CatalogProduct) -> Plan {
        if cart.contains(entry.id) {
            // Appending never duplicates a line.
            return Plan::Skip(CartOutcome::Failed(CartError::Validation(format!(
                "product {} is already in the cart",
                entry.id
            ))));
        }
        Plan::Commit {
            cart: cart.with_line(Product::from_catalog(entry, 1)),
            outcome: CartOutcome::Added,
        }
    }

    /// Set the line for `product_id` to `amount` units if stock allows it.
    pub fn plan_update(
        &self,
        cart: &Cart,
        product_id: ProductId,
        amount: u32,
        stock: &Stock,
    ) -> Plan {
        if amount == 0 {
            return Plan::Skip(CartOutcome::Failed(CartError::Validation(
                "amount must be at least 1; remove the product instead".into(),
            )));
        }

        let Some(line) = cart.find(product_id) else {
            return Plan::Skip(CartOutcome::NotInCart);
        };

        if !self.policy.allows(line.amount, amount, stock.amount) {
            return Plan::Skip(CartOutcome::OutOfStock {
                requested: amount,
                available: stock.amount,
            });
        }

        Plan::Commit {
            cart: cart.with_amount(product_id, amount),
            outcome: CartOutcome::Updated { amount },
        }
    }

    /// Drop the line for `product_id`. An absent product changes nothing,
    /// so there is nothing to commit.
    pub fn plan_remove(&self, cart: &Cart, product_id: ProductId) -> Plan {
        if !cart.contains(product_id) {
            return Plan::Skip(CartOutcome::NotInCart);
        }
        Plan::Commit {
            cart: cart.without(product_id),
            outcome: CartOutcome::Removed,
        }
    }
}
