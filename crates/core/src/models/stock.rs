use serde::{Deserialize, Serialize};

use super::product::ProductId;

/// Units available for a product, as reported by `GET /stock/{id}`.
/// Fetched fresh for every operation, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}
