//! Nâu storefront library.
//!
//! Holds the cart container and its durable store, the admin catalog API
//! client, and the terminal views the `nau` binary renders. Kept as a
//! library so the CLI and the integration tests share one implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod view;
