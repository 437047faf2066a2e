use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::CartError;
use crate::models::product::{CatalogProduct, ProductId};
use crate::models::stock::Stock;

/// Remote catalog and stock source the cart validates against.
///
/// The store only depends on this trait. `HttpCatalogProvider` is the
/// production implementation; tests plug in an in-memory one.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CatalogProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Units currently available for a product.
    async fn get_stock(&self, product_id: ProductId) -> Result<Stock, CartError>;

    /// Catalog entry (title, price, image, ...) for a product.
    async fn get_product(&self, product_id: ProductId) -> Result<CatalogProduct, CartError>;
}

/// Fire-and-forget sink for user-facing messages (a toast, a status bar...).
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<T: CatalogProvider + ?Sized> CatalogProvider for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn get_stock(&self, product_id: ProductId) -> Result<Stock, CartError> {
        (**self).get_stock(product_id).await
    }

    async fn get_product(&self, product_id: ProductId) -> Result<CatalogProduct, CartError> {
        (**self).get_product(product_id).await
    }
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn error(&self, message: &str) {
        (**self).error(message);
    }
}
