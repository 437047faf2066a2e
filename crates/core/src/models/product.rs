use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Catalog identifier of a product. Unique within a cart.
pub type ProductId = u64;

/// A product as served by the remote catalog (`GET /products/{id}`).
///
/// Only `id` matters to the store. The display fields are kept for the UI,
/// and any other catalog field is carried through untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub image: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One cart line: a catalog product plus the quantity selected by the shopper.
///
/// Serialized flat, exactly as the catalog entry with an extra `amount` field,
/// so the persisted cart reads like `[{"id":1,"title":"X","price":10,"amount":1}]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub image: String,

    /// Selected quantity. Always ≥ 1 for a line held in a cart.
    pub amount: u32,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Turn a catalog entry into a cart line with the given quantity.
    pub fn from_catalog(entry: CatalogProduct, amount: u32) -> Self {
        let CatalogProduct {
            id,
            title,
            price,
            image,
            mut extra,
        } = entry;
        // A stray `amount` in the catalog payload would be serialized twice.
        extra.remove("amount");
        Self {
            id,
            title,
            price,
            image,
            amount,
            extra,
        }
    }

    /// Copy of this line with a different quantity.
    #[must_use]
    pub fn with_amount(&self, amount: u32) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }

    /// `price × amount`, as shown per line on the cart page.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.amount)
    }
}
