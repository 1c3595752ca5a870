//! Arcadia Core - Shared types library.
//!
//! This crate provides common types used across all Arcadia components:
//! - `engine` - Stock-aware catalog/cart consistency engine
//! - `cli` - Command-line tools for seeding and inspection
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage access, no channels. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, display-price parsing, and the
//!   catalog/cart/session/sale domain types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
