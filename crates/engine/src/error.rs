//! Unified error handling for the engine.
//!
//! Validation failures surface as explicit values to the caller and leave
//! state exactly as it was before the call. Storage failures are not
//! recoverable locally and propagate as fatal to the calling operation;
//! the previously persisted record is never partially overwritten.
//!
//! Deliberately absent from this taxonomy: a malformed price is not an
//! error anywhere in the engine - it parses to `0.0` by policy (see
//! `arcadia_core::price`). Unknown-id cart operations are silent no-ops,
//! matching the permissive style of the data this engine grew out of.

use thiserror::Error;

use arcadia_core::ProductId;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Errors from catalog store operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The referenced product does not exist.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// A stock decrement asked for more units than remain.
    #[error(
        "insufficient stock for product {product_id}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        /// Product whose stock ran short.
        product_id: ProductId,
        /// Units the operation asked for.
        requested: u32,
        /// Units actually available.
        available: u32,
    },

    /// Persistence failed; the store state is unchanged.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors from the checkout coordinator.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A cart line exceeds the stock currently available. Nothing was
    /// decremented and the cart is unchanged.
    #[error(
        "insufficient stock for product {product_id}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        /// Product whose stock ran short.
        product_id: ProductId,
        /// Units the cart line holds.
        requested: u32,
        /// Units actually available.
        available: u32,
    },

    /// Persistence failed mid-checkout; applied stock decrements were
    /// compensated where possible.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<CatalogError> for CheckoutError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InsufficientStock {
                product_id,
                requested,
                available,
            } => Self::InsufficientStock {
                product_id,
                requested,
                available,
            },
            CatalogError::Storage(storage) => Self::Storage(storage),
            // A product deleted between validation and decrement is skipped
            // by the coordinator, so NotFound cannot normally reach callers;
            // report it as an exhausted line if it ever does.
            CatalogError::NotFound(product_id) => Self::InsufficientStock {
                product_id,
                requested: 0,
                available: 0,
            },
        }
    }
}

/// Errors from user registration.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// The username is already registered (byte-exact match).
    #[error("username already taken")]
    UsernameTaken,

    /// The email is already registered (case-insensitive match).
    #[error("email already registered")]
    EmailTaken,

    /// Persistence failed; no user was added.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors from bringing the engine up: loading configuration and opening
/// the stores over their persisted records.
///
/// Operations on a running engine report their per-store enums instead;
/// binaries (the CLI) funnel this type into one exit path.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Persistence failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_display() {
        let err = CatalogError::InsufficientStock {
            product_id: ProductId::new(3),
            requested: 5,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "insufficient stock for product 3: requested 5, available 2"
        );
    }

    #[test]
    fn test_engine_error_wraps_startup_failures() {
        let err = EngineError::from(StorageError::Io(std::io::Error::other("disk full")));
        assert!(err.to_string().starts_with("storage error"));

        let err = EngineError::from(ConfigError::InvalidEnvVar(
            "ARCADIA_ADMIN_EMAIL".to_string(),
            "email must contain an @ symbol".to_string(),
        ));
        assert!(err.to_string().starts_with("config error"));
    }

    #[test]
    fn test_checkout_from_catalog_error() {
        let err: CheckoutError = CatalogError::InsufficientStock {
            product_id: ProductId::new(1),
            requested: 2,
            available: 1,
        }
        .into();
        assert!(matches!(
            err,
            CheckoutError::InsufficientStock {
                requested: 2,
                available: 1,
                ..
            }
        ));
    }
}
