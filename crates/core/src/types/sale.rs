//! Sale records produced by checkout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cart::CartLine;
use super::id::SaleId;

/// One completed purchase.
///
/// Created only by the checkout coordinator; the sales log is append-only
/// and sales are never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Unique sale ID.
    pub id: SaleId,
    /// When the purchase completed.
    pub date: DateTime<Utc>,
    /// Cart lines as they were at purchase time.
    pub items: Vec<CartLine>,
    /// Total charged, from the prices current at purchase time.
    pub total: f64,
    /// Username the sale is attributed to.
    pub user_id: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::id::ProductId;

    #[test]
    fn test_serde_roundtrip() {
        let sale = Sale {
            id: SaleId::new(1),
            date: Utc::now(),
            items: vec![CartLine {
                product_id: ProductId::new(2),
                quantity: 3,
            }],
            total: 149.97,
            user_id: "ana".to_string(),
        };

        let json = serde_json::to_string(&sale).unwrap();
        let parsed: Sale = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sale);
    }

    #[test]
    fn test_items_use_persisted_line_shape() {
        let sale = Sale {
            id: SaleId::new(1),
            date: Utc::now(),
            items: vec![CartLine {
                product_id: ProductId::new(9),
                quantity: 1,
            }],
            total: 10.0,
            user_id: "ana".to_string(),
        };
        let json = serde_json::to_value(&sale).unwrap();
        assert_eq!(json["items"][0]["id"], 9);
        assert_eq!(json["items"][0]["qty"], 1);
        assert_eq!(json["userId"], "ana");
    }
}
