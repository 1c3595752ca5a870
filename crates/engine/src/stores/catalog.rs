//! Catalog store: products and their stock counters.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{info, warn};

use arcadia_core::{NewProduct, Product, ProductId};

use crate::error::CatalogError;
use crate::storage::{self, SharedStorage, StorageError, keys};

/// Owns the set of products and their stock counters.
///
/// Every successful mutation persists the full catalog record before
/// returning and republishes the catalog snapshot. A failed persist leaves
/// both memory and the previous record untouched.
pub struct CatalogStore {
    storage: SharedStorage,
    state: Mutex<Vec<Product>>,
    snapshot_tx: watch::Sender<Arc<[Product]>>,
}

impl CatalogStore {
    /// Open the catalog, restoring the persisted record.
    ///
    /// On first use (no persisted record) the catalog seeds itself with the
    /// default product list and persists it, so the store is never empty
    /// after first load.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the record cannot be read, decoded, or
    /// (when seeding) written.
    pub fn open(storage: SharedStorage) -> Result<Self, StorageError> {
        let products = match storage::read_record::<Vec<Product>>(storage.as_ref(), keys::CATALOG)?
        {
            Some(products) => products,
            None => {
                let defaults = default_products();
                storage::write_record(storage.as_ref(), keys::CATALOG, &defaults)?;
                info!(count = defaults.len(), "seeded default catalog");
                defaults
            }
        };

        let (snapshot_tx, _) = watch::channel(Arc::from(products.as_slice()));
        Ok(Self {
            storage,
            state: Mutex::new(products),
            snapshot_tx,
        })
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn list(&self) -> Vec<Product> {
        self.snapshot_tx.borrow().to_vec()
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<Product> {
        self.snapshot_tx
            .borrow()
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Subscribe to catalog snapshots. The receiver always holds the
    /// complete, immutable product list as of the last mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<[Product]>> {
        self.snapshot_tx.subscribe()
    }

    /// Create a product, assigning the next free ID (`max + 1`, or `1` for
    /// an empty catalog).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting fails; nothing is created.
    pub fn create(&self, new: NewProduct) -> Result<Product, StorageError> {
        let mut guard = self.lock();

        let next_id = guard
            .iter()
            .map(|p| p.id.as_i32())
            .max()
            .map_or(1, |max| max + 1);
        let product = new.with_id(ProductId::new(next_id));

        let mut candidate = guard.clone();
        candidate.push(product.clone());
        self.commit(&mut guard, candidate)?;

        info!(product_id = %product.id, title = %product.title, "created product");
        Ok(product)
    }

    /// Replace a product wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] (with state untouched) if no
    /// product has the given ID, or [`CatalogError::Storage`] if persisting
    /// fails.
    pub fn update(&self, product: Product) -> Result<(), CatalogError> {
        let mut guard = self.lock();

        let pos = guard
            .iter()
            .position(|p| p.id == product.id)
            .ok_or(CatalogError::NotFound(product.id))?;

        let mut candidate = guard.clone();
        if let Some(slot) = candidate.get_mut(pos) {
            *slot = product;
        }
        self.commit(&mut guard, candidate)?;
        Ok(())
    }

    /// Delete a product by ID.
    ///
    /// Returns `false` (a silent no-op) when the ID is unknown. Cart lines
    /// referencing the deleted product are the cart store's concern; it
    /// ignores them rather than crashing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting fails; nothing is deleted.
    pub fn delete(&self, id: ProductId) -> Result<bool, StorageError> {
        let mut guard = self.lock();

        let Some(pos) = guard.iter().position(|p| p.id == id) else {
            return Ok(false);
        };

        let mut candidate = guard.clone();
        candidate.remove(pos);
        self.commit(&mut guard, candidate)?;

        info!(product_id = %id, "deleted product");
        Ok(true)
    }

    /// Decrement a product's stock, persisting immediately.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown ID,
    /// [`CatalogError::InsufficientStock`] when `amount` exceeds the current
    /// stock (state untouched), or [`CatalogError::Storage`] if persisting
    /// fails.
    pub fn decrease_stock(&self, id: ProductId, amount: u32) -> Result<(), CatalogError> {
        let mut guard = self.lock();

        let pos = guard
            .iter()
            .position(|p| p.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        let available = guard.get(pos).map_or(0, |p| p.stock);

        if amount > available {
            return Err(CatalogError::InsufficientStock {
                product_id: id,
                requested: amount,
                available,
            });
        }

        let mut candidate = guard.clone();
        if let Some(product) = candidate.get_mut(pos) {
            product.stock -= amount;
        }
        self.commit(&mut guard, candidate)?;
        Ok(())
    }

    /// Put units back after a failed checkout step.
    ///
    /// A product deleted in the meantime is skipped with a warning; there
    /// is nothing left to restore onto.
    pub(crate) fn restore_stock(&self, id: ProductId, amount: u32) -> Result<(), StorageError> {
        let mut guard = self.lock();

        let Some(pos) = guard.iter().position(|p| p.id == id) else {
            warn!(product_id = %id, amount, "cannot restore stock for deleted product");
            return Ok(());
        };

        let mut candidate = guard.clone();
        if let Some(product) = candidate.get_mut(pos) {
            product.stock = product.stock.saturating_add(amount);
        }
        self.commit(&mut guard, candidate)
    }

    /// Persist `candidate`, then swap it in and publish. On persist failure
    /// the guarded state is left exactly as it was.
    fn commit(
        &self,
        guard: &mut MutexGuard<'_, Vec<Product>>,
        candidate: Vec<Product>,
    ) -> Result<(), StorageError> {
        storage::write_record(self.storage.as_ref(), keys::CATALOG, &candidate)?;
        **guard = candidate;
        self.snapshot_tx.send_replace(Arc::from(guard.as_slice()));
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Product>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The catalog every fresh installation starts with.
fn default_products() -> Vec<Product> {
    let seed = [
        (
            1,
            "The Last Horizon",
            "Adventure",
            "$59.990",
            4.8,
            "Chart a dying galaxy in search of a new home world.",
            "assets/the_last_horizon.png",
            12,
        ),
        (
            2,
            "Neon Circuit",
            "Racing",
            "$39.990",
            4.2,
            "Anti-gravity racing through rain-slicked megacities.",
            "assets/neon_circuit.png",
            8,
        ),
        (
            3,
            "Starlight Drifter",
            "Adventure",
            "$49.990",
            4.5,
            "Open-world sailing across a shattered archipelago.",
            "assets/starlight_drifter.png",
            10,
        ),
        (
            4,
            "Dungeon of Embers",
            "RPG",
            "$69.990",
            4.7,
            "A tactical descent into an ever-burning underworld.",
            "assets/dungeon_of_embers.png",
            6,
        ),
        (
            5,
            "Pocket Orchard",
            "Casual",
            "$9.990,50",
            4.0,
            "Grow, graft, and trade impossible fruit.",
            "assets/pocket_orchard.png",
            20,
        ),
        (
            6,
            "Iron Vanguard",
            "Strategy",
            "$54.990",
            4.4,
            "Command mechanized battalions across frozen fronts.",
            "assets/iron_vanguard.png",
            5,
        ),
    ];

    seed.into_iter()
        .map(
            |(id, title, genre, price, rating, description, image_ref, stock)| Product {
                id: ProductId::new(id),
                title: title.to_string(),
                genre: genre.to_string(),
                price: price.to_string(),
                rating,
                description: description.to_string(),
                image_ref: image_ref.to_string(),
                stock,
            },
        )
        .collect()
}
