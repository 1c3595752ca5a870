//! Append-only sales log.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::info;

use arcadia_core::{CartLine, Sale, SaleId};

use crate::storage::{self, SharedStorage, StorageError, keys};

/// Records completed sales. Sales are only ever appended; nothing in the
/// engine mutates or deletes them.
pub struct SalesLog {
    storage: SharedStorage,
    state: Mutex<Vec<Sale>>,
}

impl SalesLog {
    /// Open the log, restoring the persisted record (empty on first use;
    /// nothing is written until the first sale).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the record cannot be read or decoded.
    pub fn open(storage: SharedStorage) -> Result<Self, StorageError> {
        let sales: Vec<Sale> =
            storage::read_record(storage.as_ref(), keys::SALES)?.unwrap_or_default();
        Ok(Self {
            storage,
            state: Mutex::new(sales),
        })
    }

    /// All recorded sales, oldest first.
    #[must_use]
    pub fn list(&self) -> Vec<Sale> {
        self.lock().clone()
    }

    /// Record a sale with a fresh ID and the current timestamp, persisting
    /// before returning.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting fails; nothing is recorded.
    pub fn record(
        &self,
        items: Vec<CartLine>,
        total: f64,
        user_id: &str,
    ) -> Result<Sale, StorageError> {
        let mut guard = self.lock();

        let next_id = guard
            .iter()
            .map(|s| s.id.as_i32())
            .max()
            .map_or(1, |max| max + 1);
        let sale = Sale {
            id: SaleId::new(next_id),
            date: Utc::now(),
            items,
            total,
            user_id: user_id.to_string(),
        };

        let mut candidate = guard.clone();
        candidate.push(sale.clone());
        storage::write_record(self.storage.as_ref(), keys::SALES, &candidate)?;
        *guard = candidate;

        info!(sale_id = %sale.id, total = sale.total, user = %sale.user_id, "recorded sale");
        Ok(sale)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Sale>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
