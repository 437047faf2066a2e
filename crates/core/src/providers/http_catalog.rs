use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::{debug, instrument};

use crate::errors::CartError;
use crate::models::product::{CatalogProduct, ProductId};
use crate::models::settings::CartSettings;
use crate::models::stock::Stock;
use super::traits::CatalogProvider;

/// Catalog/stock provider backed by the storefront JSON API.
///
/// - `GET {base}/stock/{id}` → `{ "id": 1, "amount": 5 }`
/// - `GET {base}/products/{id}` → `{ "id": 1, "title": "...", "price": 179.9, "image": "..." }`
///
/// Any non-2xx status, transport failure or body that does not parse is an error.
pub struct HttpCatalogProvider {
    client: Client,
    base_url: String,
}

impl HttpCatalogProvider {
    pub fn new(settings: &CartSettings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL requests are issued against (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self), fields(base = %self.base_url))]
    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, CartError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CartError::Api {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!(status = %status, bytes = body.len(), "catalog response");

        serde_json::from_str(&body).map_err(|e| CartError::InvalidResponse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CatalogProvider for HttpCatalogProvider {
    fn name(&self) -> &str {
        "HttpCatalog"
    }

    async fn get_stock(&self, product_id: ProductId) -> Result<Stock, CartError> {
        let path = format!("/stock/{product_id}");
        let stock: Stock = self.fetch(&path).await?;
        if stock.id != product_id {
            return Err(CartError::InvalidResponse {
                path,
                message: format!("expected stock for product {product_id}, got {}", stock.id),
            });
        }
        Ok(stock)
    }

    async fn get_product(&self, product_id: ProductId) -> Result<CatalogProduct, CartError> {
        let path = format!("/products/{product_id}");
        let product: CatalogProduct = self.fetch(&path).await?;
        if product.id != product_id {
            return Err(CartError::InvalidResponse {
                path,
                message: format!("expected product {product_id}, got {}", product.id),
            });
        }
        Ok(product)
    }
}
