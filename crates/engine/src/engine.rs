//! The [`Engine`] facade wiring the stores together.

use std::sync::Arc;

use arcadia_core::Sale;

use crate::checkout::CheckoutCoordinator;
use crate::config::EngineConfig;
use crate::error::{CheckoutError, EngineError};
use crate::storage::{JsonFileStore, SharedStorage};
use crate::stores::{CartStore, CatalogStore, SalesLog, SessionStore};

/// The fully wired engine: one storage backend, four stores, and the
/// checkout path.
///
/// Cheaply cloneable via `Arc`; every consumer receives the same store
/// instances by reference instead of reaching for ambient global state.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    config: EngineConfig,
    catalog: CatalogStore,
    cart: CartStore,
    session: SessionStore,
    sales: SalesLog,
}

impl Engine {
    /// Open the engine over the file-backed store at the configured data
    /// directory.
    ///
    /// First use seeds the default catalog and bootstraps the admin
    /// account; subsequent opens restore all persisted state, including
    /// the cart (lines for products no longer in the catalog are dropped).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the data directory cannot be prepared or
    /// any persisted record fails to load.
    pub fn open(config: EngineConfig) -> Result<Self, EngineError> {
        let storage: SharedStorage = Arc::new(JsonFileStore::open(&config.data_dir)?);
        Self::with_storage(config, storage)
    }

    /// Open the engine over an explicit storage backend (tests inject the
    /// in-memory fake here).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if any persisted record fails to load.
    pub fn with_storage(config: EngineConfig, storage: SharedStorage) -> Result<Self, EngineError> {
        let catalog = CatalogStore::open(storage.clone())?;
        let cart = CartStore::restore(storage.clone(), &catalog.list())?;
        let session = SessionStore::open(storage.clone(), &config.admin)?;
        let sales = SalesLog::open(storage)?;

        Ok(Self {
            inner: Arc::new(EngineInner {
                config,
                catalog,
                cart,
                session,
                sales,
            }),
        })
    }

    /// Get a reference to the engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog store.
    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Get a reference to the sales log.
    #[must_use]
    pub fn sales(&self) -> &SalesLog {
        &self.inner.sales
    }

    /// Check out the current cart for `user_id`.
    ///
    /// Convenience over [`CheckoutCoordinator`]; on success the cart's
    /// catalog view is refreshed so later stock checks see the decremented
    /// counters.
    ///
    /// # Errors
    ///
    /// See [`CheckoutCoordinator::checkout`].
    pub fn checkout(&self, user_id: &str) -> Result<Sale, CheckoutError> {
        let sale = CheckoutCoordinator::new(self.catalog(), self.cart(), self.sales())
            .checkout(user_id)?;
        self.cart().set_catalog(&self.catalog().list());
        Ok(sale)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn engine() -> Engine {
        let storage: SharedStorage = Arc::new(MemoryStore::new());
        Engine::with_storage(EngineConfig::at("unused"), storage).unwrap()
    }

    #[test]
    fn test_open_seeds_catalog_and_admin() {
        let engine = engine();
        assert!(!engine.catalog().list().is_empty());
        assert_eq!(engine.session().users().len(), 1);
        assert!(engine.session().users().first().unwrap().is_admin);
    }

    #[test]
    fn test_checkout_refreshes_cart_catalog_view() {
        let engine = engine();
        let product = engine.catalog().list().first().cloned().unwrap();
        engine.cart().set_catalog(&engine.catalog().list());

        engine.cart().add_to_cart(product.id, 2).unwrap();
        engine.checkout("admin").unwrap();

        // A follow-up add sees the decremented stock: filling the cart up
        // to the old stock level now gets dropped on the increment path
        engine.cart().add_to_cart(product.id, product.stock).unwrap();
        let err_free_count = engine.cart().items_count();
        engine.cart().add_to_cart(product.id, 1).unwrap();
        assert_eq!(engine.cart().items_count(), err_free_count);
    }

    #[test]
    fn test_clone_shares_state() {
        let engine = engine();
        let clone = engine.clone();

        let product = engine.catalog().list().first().cloned().unwrap();
        engine.cart().set_catalog(&engine.catalog().list());
        engine.cart().add_to_cart(product.id, 1).unwrap();

        assert_eq!(clone.cart().items_count(), 1);
    }
}
