//! The engine's stateful stores.
//!
//! Each store owns one persisted record and follows the same discipline on
//! its write path: take the store mutex, validate, build the next state,
//! persist it, and only then swap it in and publish a fresh immutable
//! snapshot. Reads never take the mutex - they see the last published
//! snapshot.

pub mod cart;
pub mod catalog;
pub mod sales;
pub mod session;

pub use cart::CartStore;
pub use catalog::CatalogStore;
pub use sales::SalesLog;
pub use session::SessionStore;
