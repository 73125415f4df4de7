//! Nâu Core - Shared types library.
//!
//! This crate provides the domain types used across all Nâu components:
//! - `storefront` - Catalog client, cart container and durable store
//! - `cli` - The `nau` command-line storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage,
//! no HTTP clients. The cart reducer lives here so it can be tested without
//! any persistence attached.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, VND prices, line items and the cart state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
