//! Core types for Nâu.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod line_item;
pub mod price;

pub use cart::CartState;
pub use id::*;
pub use line_item::LineItem;
pub use price::{CurrencyCode, Price};
