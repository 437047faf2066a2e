use serde::{Deserialize, Serialize};

use crate::errors::CartError;

/// Key of the persistence slot holding the serialized cart.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Base URL of the catalog/stock API.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";

/// HTTP request timeout (native targets only).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// How the stock check decides whether a cart line may take a new quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockPolicy {
    /// Allowed iff the requested quantity is at most the available stock.
    /// The last unit in stock is reachable, and a quantity can always be
    /// lowered to something the stock still covers.
    #[default]
    RequestedWithinStock,
    /// Allowed iff the line's current quantity is strictly below the
    /// available stock, whatever the requested quantity. Kept for carts that
    /// must behave exactly like the legacy storefront.
    CurrentBelowStock,
}

impl StockPolicy {
    /// Whether a line holding `current` units may move to `requested` units
    /// when `available` units are in stock.
    #[must_use]
    pub fn allows(self, current: u32, requested: u32, available: u32) -> bool {
        match self {
            StockPolicy::RequestedWithinStock => requested <= available,
            StockPolicy::CurrentBelowStock => current < available,
        }
    }
}

impl std::fmt::Display for StockPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockPolicy::RequestedWithinStock => write!(f, "requested-within-stock"),
            StockPolicy::CurrentBelowStock => write!(f, "current-below-stock"),
        }
    }
}

impl std::str::FromStr for StockPolicy {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "requested-within-stock" => Ok(StockPolicy::RequestedWithinStock),
            "current-below-stock" => Ok(StockPolicy::CurrentBelowStock),
            other => Err(CartError::Config(format!(
                "unknown stock policy '{other}' (expected 'requested-within-stock' or 'current-below-stock')"
            ))),
        }
    }
}

/// Store configuration.
///
/// # Environment Variables
/// - `CART_API_URL` - catalog/stock API base URL (default: `http://localhost:3333`)
/// - `CART_STORAGE_KEY` - persistence slot key (default: `@RocketShoes:cart`)
/// - `CART_REQUEST_TIMEOUT_SECS` - HTTP timeout in seconds (default: 30)
/// - `CART_STOCK_POLICY` - `requested-within-stock` or `current-below-stock`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSettings {
    pub api_base_url: String,
    pub storage_key: String,
    pub request_timeout_secs: u64,
    pub stock_policy: StockPolicy,
}

impl Default for CartSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            stock_policy: StockPolicy::default(),
        }
    }
}

impl CartSettings {
    /// Defaults overlaid with whatever `CART_*` variables are set.
    pub fn from_env() -> Result<Self, CartError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`CartSettings::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CartError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(url) = lookup("CART_API_URL") {
            settings.api_base_url = url;
        }
        if let Some(key) = lookup("CART_STORAGE_KEY") {
            settings.storage_key = key;
        }
        if let Some(secs) = lookup("CART_REQUEST_TIMEOUT_SECS") {
            settings.request_timeout_secs = secs.trim().parse().map_err(|_| {
                CartError::Config(format!(
                    "CART_REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{secs}'"
                ))
            })?;
        }
        if let Some(policy) = lookup("CART_STOCK_POLICY") {
            settings.stock_policy = policy.parse()?;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the store cannot work with.
    pub fn validate(&self) -> Result<(), CartError> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CartError::Config(format!(
                "API base URL '{}' must start with http:// or https://",
                self.api_base_url
            )));
        }
        if self.storage_key.trim().is_empty() {
            return Err(CartError::Config("storage key must not be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(CartError::Config("request timeout must be at least 1 second".into()));
        }
        Ok(())
    }
}
