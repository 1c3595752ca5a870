//! Checkout: the atomic conversion of a cart into a stock decrement and a
//! sale record.

use tracing::{error, warn};

use arcadia_core::{CartLine, Sale};

use crate::error::CheckoutError;
use crate::stores::{CartStore, CatalogStore, SalesLog};

/// Validates the whole cart against current stock, then applies the
/// purchase all-or-nothing.
///
/// Cart lines whose product has been deleted from the catalog are ignored:
/// they do not block the checkout, decrement nothing, and do not appear in
/// the sale.
pub struct CheckoutCoordinator<'a> {
    catalog: &'a CatalogStore,
    cart: &'a CartStore,
    sales: &'a SalesLog,
}

impl<'a> CheckoutCoordinator<'a> {
    /// Wire a coordinator over the three collaborating stores.
    #[must_use]
    pub const fn new(catalog: &'a CatalogStore, cart: &'a CartStore, sales: &'a SalesLog) -> Self {
        Self {
            catalog,
            cart,
            sales,
        }
    }

    /// Check out the current cart for `user_id`.
    ///
    /// Every line is validated against the *current* catalog stock before
    /// anything is touched; any line over stock aborts the whole checkout
    /// with no side effects. On success, stock is decremented per line, the
    /// cart is cleared, and the sale is appended to the log.
    ///
    /// Partial application is never observable: if a step fails after some
    /// stock was decremented, the decrements are compensated before the
    /// error surfaces and the cart is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InsufficientStock`] if any line exceeds
    /// available stock, or [`CheckoutError::Storage`] if persistence fails
    /// mid-transaction.
    pub fn checkout(&self, user_id: &str) -> Result<Sale, CheckoutError> {
        let snapshot = self.cart.snapshot();

        // Resolve each line against the current catalog; deleted products
        // are ignored rather than crashing the purchase.
        let mut items: Vec<CartLine> = Vec::with_capacity(snapshot.lines.len());
        let mut total = 0.0;
        for line in snapshot.lines.iter() {
            let Some(product) = self.catalog.get(line.product_id) else {
                warn!(product_id = %line.product_id, "ignoring cart line for deleted product");
                continue;
            };
            if line.quantity > product.stock {
                return Err(CheckoutError::InsufficientStock {
                    product_id: line.product_id,
                    requested: line.quantity,
                    available: product.stock,
                });
            }
            total += product.price_amount() * f64::from(line.quantity);
            items.push(*line);
        }

        // Apply the decrements; compensate everything applied so far if one
        // fails (possible only under concurrent mutation, the pre-check
        // covers the single-writer case).
        let mut applied: Vec<CartLine> = Vec::with_capacity(items.len());
        for line in &items {
            if let Err(err) = self.catalog.decrease_stock(line.product_id, line.quantity) {
                self.compensate(&applied);
                return Err(err.into());
            }
            applied.push(*line);
        }

        if let Err(err) = self.cart.clear() {
            self.compensate(&applied);
            return Err(err.into());
        }

        // Stock and cart are committed; a failure here loses only the sale
        // record and is surfaced as fatal to the caller.
        let sale = self.sales.record(items, total, user_id).map_err(|err| {
            error!(user = %user_id, "sale record could not be persisted after checkout");
            err
        })?;

        Ok(sale)
    }

    /// Best-effort restoration of already-applied stock decrements.
    fn compensate(&self, applied: &[CartLine]) {
        for line in applied {
            if let Err(err) = self
                .catalog
                .restore_stock(line.product_id, line.quantity)
            {
                error!(
                    product_id = %line.product_id,
                    quantity = line.quantity,
                    %err,
                    "failed to restore stock while aborting checkout"
                );
            }
        }
    }
}
