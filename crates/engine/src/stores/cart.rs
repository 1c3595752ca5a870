//! Cart store: product quantities, the stock invariant, and snapshots.
//!
//! ## Stock enforcement asymmetry
//!
//! Incrementing an existing line enforces the stock ceiling
//! (threshold-or-nothing: the add is applied in full or dropped in full),
//! but appending a *new* line and [`CartStore::update_quantity`] do not
//! check stock at all. This asymmetry is intentional-as-shipped: it matches
//! the behavior the persisted data has always been produced under, and
//! unifying the paths would change what callers observe. Checkout is where
//! stock is authoritatively enforced.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, warn};

use arcadia_core::{CartLine, CartSnapshot, Product, ProductId, price};

use crate::storage::{self, SharedStorage, StorageError, keys};

/// Owns the mapping from product ID to quantity.
///
/// Every effective mutation persists the serialized line list before
/// returning and publishes a recomputed [`CartSnapshot`]. Operations that
/// change nothing (unknown IDs, zero-quantity adds, dropped increments)
/// touch neither memory nor the persisted record.
pub struct CartStore {
    storage: SharedStorage,
    state: Mutex<CartState>,
    snapshot_tx: watch::Sender<CartSnapshot>,
}

struct CartState {
    /// Lines in insertion order.
    lines: Vec<CartLine>,
    /// The store's view of available products, for stock and prices.
    catalog: HashMap<ProductId, Product>,
}

impl CartState {
    fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::compute(&self.lines, |id| {
            self.catalog.get(&id).map(Product::price_amount)
        })
    }
}

impl CartStore {
    /// Restore the cart from its persisted record.
    ///
    /// Lines referencing products absent from `catalog` are silently
    /// dropped (with a warning log); the trimmed set is not re-persisted
    /// until the next mutation.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the record cannot be read or decoded.
    pub fn restore(storage: SharedStorage, catalog: &[Product]) -> Result<Self, StorageError> {
        let persisted: Vec<CartLine> =
            storage::read_record(storage.as_ref(), keys::CART)?.unwrap_or_default();

        let view: HashMap<ProductId, Product> =
            catalog.iter().map(|p| (p.id, p.clone())).collect();

        let before = persisted.len();
        let lines: Vec<CartLine> = persisted
            .into_iter()
            .filter(|line| view.contains_key(&line.product_id))
            .collect();
        if lines.len() < before {
            warn!(
                dropped = before - lines.len(),
                "dropped persisted cart lines for unknown products"
            );
        }

        let state = CartState {
            lines,
            catalog: view,
        };
        let (snapshot_tx, _) = watch::channel(state.snapshot());

        Ok(Self {
            storage,
            state: Mutex::new(state),
            snapshot_tx,
        })
    }

    /// Replace the store's view of available products.
    ///
    /// Does not persist anything; republishes the snapshot since prices may
    /// have changed. Lines whose product vanished from the view stay in the
    /// cart and simply price as zero.
    pub fn set_catalog(&self, catalog: &[Product]) {
        let mut guard = self.lock();
        guard.catalog = catalog.iter().map(|p| (p.id, p.clone())).collect();
        self.snapshot_tx.send_replace(guard.snapshot());
    }

    /// Add `quantity` units of a product to the cart.
    ///
    /// - Unknown product: silent no-op.
    /// - Zero quantity: no-op; neither memory nor the record changes.
    /// - Existing line: applied only if `existing + quantity` fits in
    ///   stock; otherwise the whole add is dropped (never clamped).
    /// - No existing line: appended unconditionally, even past stock (see
    ///   the module docs on the enforcement asymmetry).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting fails; the cart is unchanged.
    pub fn add_to_cart(&self, product_id: ProductId, quantity: u32) -> Result<(), StorageError> {
        let mut guard = self.lock();

        if quantity == 0 {
            debug!(product_id = %product_id, "ignoring zero-quantity add");
            return Ok(());
        }

        let Some(product) = guard.catalog.get(&product_id) else {
            debug!(product_id = %product_id, "ignoring add for unknown product");
            return Ok(());
        };
        let stock = product.stock;

        let mut candidate = guard.lines.clone();
        match candidate.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                // A sum past u32::MAX can never fit in stock either
                let wanted = match line.quantity.checked_add(quantity) {
                    Some(wanted) if wanted <= stock => wanted,
                    _ => {
                        debug!(
                            product_id = %product_id,
                            quantity,
                            stock,
                            "dropping add that would exceed stock"
                        );
                        return Ok(());
                    }
                };
                line.quantity = wanted;
            }
            None => {
                candidate.push(CartLine {
                    product_id,
                    quantity,
                });
            }
        }

        self.commit(&mut guard, candidate)
    }

    /// Set a line's quantity outright.
    ///
    /// A non-positive quantity removes the line. A positive quantity
    /// replaces the line's quantity with no stock check; an unknown line is
    /// a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting fails; the cart is unchanged.
    pub fn update_quantity(&self, product_id: ProductId, quantity: i32) -> Result<(), StorageError> {
        if quantity <= 0 {
            return self.remove_from_cart(product_id);
        }
        #[allow(clippy::cast_sign_loss)] // positive by the check above
        let quantity = quantity as u32;

        let mut guard = self.lock();

        let mut candidate = guard.lines.clone();
        let Some(line) = candidate.iter_mut().find(|l| l.product_id == product_id) else {
            return Ok(());
        };
        if line.quantity == quantity {
            return Ok(());
        }
        line.quantity = quantity;

        self.commit(&mut guard, candidate)
    }

    /// Remove a line entirely. Removing an absent line is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting fails; the cart is unchanged.
    pub fn remove_from_cart(&self, product_id: ProductId) -> Result<(), StorageError> {
        let mut guard = self.lock();

        let before = guard.lines.len();
        let candidate: Vec<CartLine> = guard
            .lines
            .iter()
            .copied()
            .filter(|l| l.product_id != product_id)
            .collect();
        if candidate.len() == before {
            return Ok(());
        }

        self.commit(&mut guard, candidate)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting fails; the cart is unchanged.
    pub fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self.lock();
        if guard.lines.is_empty() {
            return Ok(());
        }
        self.commit(&mut guard, Vec::new())
    }

    /// Sum of line quantities.
    #[must_use]
    pub fn items_count(&self) -> u32 {
        self.snapshot_tx.borrow().item_count
    }

    /// Total of the cart priced against the supplied catalog; lines whose
    /// product is missing from it contribute zero.
    #[must_use]
    pub fn total(&self, catalog: &[Product]) -> f64 {
        let snapshot = self.snapshot();
        snapshot
            .lines
            .iter()
            .map(|line| {
                let amount = catalog
                    .iter()
                    .find(|p| p.id == line.product_id)
                    .map_or(0.0, |p| price::parse_amount(&p.price));
                amount * f64::from(line.quantity)
            })
            .sum()
    }

    /// The last published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Subscribe to cart snapshots. Readers always see a complete,
    /// immutable view; a mutation in progress is never observable.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Persist `candidate`, then swap it in and publish. On persist failure
    /// the guarded state is left exactly as it was.
    fn commit(
        &self,
        guard: &mut MutexGuard<'_, CartState>,
        candidate: Vec<CartLine>,
    ) -> Result<(), StorageError> {
        storage::write_record(self.storage.as_ref(), keys::CART, &candidate)?;
        guard.lines = candidate;
        self.snapshot_tx.send_replace(guard.snapshot());
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, CartState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
