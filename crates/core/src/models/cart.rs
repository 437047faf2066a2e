use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::product::{Product, ProductId};

/// The shopper's cart: cart lines in the order they were added.
///
/// A `Cart` value is never edited in place. Every change goes through one of
/// the `with_*`/`without` methods, which return the next revision and leave
/// `self` untouched. Invariants held by every revision:
/// - at most one line per product id
/// - every line has `amount ≥ 1`
///
/// Serialized as a plain JSON array of lines; deserializing goes through
/// [`Cart::from_lines`], so a parsed cart always holds the invariants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Product>", into = "Vec<Product>")]
pub struct Cart {
    lines: Vec<Product>,
}

impl Cart {
    /// An empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from arbitrary lines, dropping anything that breaks the
    /// invariants: lines with `amount == 0` and repeated ids (first one wins).
    ///
    /// Returns the cart and the number of lines that were dropped.
    pub fn from_lines(lines: Vec<Product>) -> (Self, usize) {
        let total = lines.len();
        let mut seen = HashSet::with_capacity(total);
        let lines: Vec<Product> = lines
            .into_iter()
            .filter(|line| line.amount >= 1 && seen.insert(line.id))
            .collect();
        let dropped = total - lines.len();
        (Self { lines }, dropped)
    }

    /// All lines, oldest first.
    #[must_use]
    pub fn lines(&self) -> &[Product] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.lines.iter()
    }

    /// Number of distinct products (what the storefront header displays).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.amount)).sum()
    }

    /// Sum of every line subtotal.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.lines.iter().map(Product::subtotal).sum()
    }

    #[must_use]
    pub fn find(&self, product_id: ProductId) -> Option<&Product> {
        self.lines.iter().find(|l| l.id == product_id)
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.find(product_id).is_some()
    }

    /// Next revision with `line` appended at the end.
    ///
    /// A line whose id is already present, or whose amount is 0, is ignored
    /// and the returned revision equals `self`.
    #[must_use]
    pub fn with_line(&self, line: Product) -> Self {
        if line.amount == 0 || self.contains(line.id) {
            return self.clone();
        }
        let mut lines = Vec::with_capacity(self.lines.len() + 1);
        lines.extend(self.lines.iter().cloned());
        lines.push(line);
        Self { lines }
    }

    /// Next revision where the line for `product_id` has quantity `amount`.
    /// Every other line is carried over unchanged. An `amount` of 0 removes
    /// the line instead.
    #[must_use]
    pub fn with_amount(&self, product_id: ProductId, amount: u32) -> Self {
        if amount == 0 {
            return self.without(product_id);
        }
        let lines = self
            .lines
            .iter()
            .map(|l| {
                if l.id == product_id {
                    l.with_amount(amount)
                } else {
                    l.clone()
                }
            })
            .collect();
        Self { lines }
    }

    /// Next revision without the line for `product_id`. Order is preserved.
    #[must_use]
    pub fn without(&self, product_id: ProductId) -> Self {
        let lines = self
            .lines
            .iter()
            .filter(|l| l.id != product_id)
            .cloned()
            .collect();
        Self { lines }
    }
}

impl From<Vec<Product>> for Cart {
    fn from(lines: Vec<Product>) -> Self {
        Self::from_lines(lines).0
    }
}

impl From<Cart> for Vec<Product> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
