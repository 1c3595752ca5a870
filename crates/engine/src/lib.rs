//! Arcadia Engine - stock-aware cart and inventory consistency engine.
//!
//! Keeps a shopping cart's line quantities, the product catalog's stock
//! counters, and the persisted snapshots of both mutually consistent across
//! restarts, while publishing immutable snapshots to observers (UI, tests).
//!
//! # Architecture
//!
//! Every store follows the same shape: an exclusive write path behind a
//! mutex (validate, mutate, persist, publish), and lock-free reads through
//! the last published [`tokio::sync::watch`] snapshot. Persistence goes
//! through the [`storage::KeyValueStore`] port so the on-disk backend can be
//! swapped for an in-memory fake in tests.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration, admin bootstrap seam
//! - [`storage`] - Key-value persistence port and backends
//! - [`stores`] - Catalog, cart, session, and sales stores
//! - [`checkout`] - The all-or-nothing checkout coordinator
//! - [`engine`] - The [`Engine`] facade wiring the stores together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod engine;
pub mod error;
pub mod storage;
pub mod stores;

pub use checkout::CheckoutCoordinator;
pub use config::{AdminBootstrap, ConfigError, EngineConfig};
pub use engine::Engine;
pub use error::{CatalogError, CheckoutError, EngineError, RegisterError};
pub use storage::{KeyValueStore, SharedStorage, StorageError};
pub use stores::{CartStore, CatalogStore, SalesLog, SessionStore};
