//! Core types for Arcadia.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod sale;
pub mod user;

pub use cart::{CartLine, CartSnapshot};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::parse_amount;
pub use product::{NewProduct, Product};
pub use sale::Sale;
pub use user::{NewUser, User};
