//! CLI command implementations.

pub mod catalog;
pub mod sales;
pub mod seed;
