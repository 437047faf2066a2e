use tracing::{debug, warn};

use crate::errors::CartError;
use crate::models::cart::Cart;
use crate::models::product::Product;
use super::traits::KeyValueStore;

/// The single persistence slot holding the serialized cart.
///
/// The slot is always written wholesale: the value is the JSON array of every
/// cart line, never a partial update.
pub struct CartSlot {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl CartSlot {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the persisted cart.
    ///
    /// Never fails: a missing entry, an unreadable store or a value that does
    /// not parse all yield an empty cart. Lines breaking the cart invariants
    /// are dropped.
    pub fn load(&self) -> Cart {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not read persisted cart, starting empty");
                return Cart::new();
            }
        };

        let lines: Vec<Product> = match serde_json::from_str(&raw) {
            Ok(lines) => lines,
            Err(e) => {
                warn!(key = %self.key, error = %e, "persisted cart is not valid JSON, starting empty");
                return Cart::new();
            }
        };

        let (cart, dropped) = Cart::from_lines(lines);
        if dropped > 0 {
            warn!(key = %self.key, dropped, "discarded invalid lines from persisted cart");
        }
        debug!(key = %self.key, lines = cart.len(), "loaded persisted cart");
        cart
    }

    /// Overwrite the slot with `cart`.
    pub fn save(&self, cart: &Cart) -> Result<(), CartError> {
        let json = serde_json::to_string(cart)
            .map_err(|e| CartError::Serialization(format!("Failed to serialize cart: {e}")))?;
        self.store.set(&self.key, &json)
    }
}
