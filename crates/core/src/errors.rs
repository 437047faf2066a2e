use thiserror::Error;

/// Unified error type for the entire shop-cart-core library.
/// Every fallible function returns `Result<T, CartError>`.
#[derive(Debug, Error)]
pub enum CartError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {path} returned HTTP {status}")]
    Api { path: String, status: u16 },

    #[error("Invalid response from {path}: {message}")]
    InvalidResponse { path: String, message: String },

    // ── Storage ─────────────────────────────────────────────────────
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    Config(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    Validation(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CartError {
    fn from(e: std::io::Error) -> Self {
        CartError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for CartError {
    fn from(e: serde_json::Error) -> Self {
        CartError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CartError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL; keep query strings out of logs and toasts.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CartError::Network(sanitized)
    }
}
