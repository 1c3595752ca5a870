//! Cart domain types.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// One product's quantity within the cart.
///
/// Invariant: a line always has `quantity >= 1`; a quantity of zero means
/// the line is removed, never stored. Serialized as the persisted cart
/// record shape, `{"id": n, "qty": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line refers to.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Units of the product in the cart.
    #[serde(rename = "qty")]
    pub quantity: u32,
}

/// An immutable, fully-computed view of the cart handed to observers.
///
/// Recomputed from the line set on every mutation; no field is
/// independently mutable. The line list is `Arc`-shared so cloning a
/// snapshot (or handing it to many readers) never copies the lines.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    /// Cart lines in insertion order.
    pub lines: Arc<[CartLine]>,
    /// Sum of line quantities.
    pub item_count: u32,
    /// Sum of `quantity x parsed price` over the lines.
    pub total: f64,
}

impl CartSnapshot {
    /// Snapshot of an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            lines: Arc::from([]),
            item_count: 0,
            total: 0.0,
        }
    }

    /// Compute a snapshot from a line set and a price lookup.
    ///
    /// `price_of` returns the parsed price for a product, or `None` when the
    /// product is unknown to the catalog view; unknown products contribute
    /// zero to the total (the line itself is kept).
    #[must_use]
    pub fn compute(lines: &[CartLine], price_of: impl Fn(ProductId) -> Option<f64>) -> Self {
        let item_count = lines.iter().map(|line| line.quantity).sum();
        let total = lines
            .iter()
            .map(|line| price_of(line.product_id).unwrap_or(0.0) * f64::from(line.quantity))
            .sum();

        Self {
            lines: Arc::from(lines),
            item_count,
            total,
        }
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for CartSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: i32, qty: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            quantity: qty,
        }
    }

    #[test]
    fn test_persisted_shape() {
        let json = serde_json::to_string(&line(3, 2)).unwrap();
        assert_eq!(json, r#"{"id":3,"qty":2}"#);

        let parsed: CartLine = serde_json::from_str(r#"{"id":5,"qty":1}"#).unwrap();
        assert_eq!(parsed, line(5, 1));
    }

    #[test]
    fn test_compute_counts_and_totals() {
        let lines = [line(1, 2), line(2, 1)];
        let snapshot = CartSnapshot::compute(&lines, |id| match id.as_i32() {
            1 => Some(10.0),
            2 => Some(5.5),
            _ => None,
        });

        assert_eq!(snapshot.item_count, 3);
        assert_eq!(snapshot.total, 25.5);
        assert_eq!(snapshot.lines.as_ref(), &lines);
    }

    #[test]
    fn test_unknown_product_contributes_zero() {
        let lines = [line(1, 2), line(99, 4)];
        let snapshot = CartSnapshot::compute(&lines, |id| (id.as_i32() == 1).then_some(10.0));

        // The unknown line is kept but prices as zero
        assert_eq!(snapshot.item_count, 6);
        assert_eq!(snapshot.total, 20.0);
    }

    #[test]
    fn test_empty() {
        let snapshot = CartSnapshot::empty();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.item_count, 0);
        assert_eq!(snapshot.total, 0.0);
    }
}
