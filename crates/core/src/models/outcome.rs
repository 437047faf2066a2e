use crate::errors::CartError;

use super::product::ProductId;

/// Arguments of an absolute quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    /// Desired quantity (not a delta). Must be ≥ 1.
    pub amount: u32,
}

/// What a cart operation did.
///
/// Failures never escape a store operation as `Err`; they end up here and on
/// the notifier. Only `Added`, `Updated` and `Removed` changed the cart.
#[derive(Debug)]
pub enum CartOutcome {
    /// A new line with amount 1 was appended.
    Added,
    /// An existing line now holds `amount` units.
    Updated { amount: u32 },
    /// The line was removed.
    Removed,
    /// The product has no line in the cart. Nothing changed.
    NotInCart,
    /// The stock check refused the change. Nothing changed.
    OutOfStock { requested: u32, available: u32 },
    /// A remote call, the persistence write or input validation failed.
    /// Nothing changed.
    Failed(CartError),
}

impl CartOutcome {
    /// Whether the cart changed.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(
            self,
            CartOutcome::Added | CartOutcome::Updated { .. } | CartOutcome::Removed
        )
    }
}

/// User-facing messages pushed to the notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartMessage {
    OutOfStock,
    AddFailed,
    RemoveFailed,
    UpdateFailed,
}

impl CartMessage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CartMessage::OutOfStock => "Quantidade solicitada fora de estoque",
            CartMessage::AddFailed => "Erro na adição do produto",
            CartMessage::RemoveFailed => "Erro na remoção do produto",
            CartMessage::UpdateFailed => "Erro na alteração de quantidade do produto",
        }
    }
}

impl std::fmt::Display for CartMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
