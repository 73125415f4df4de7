//! Command implementations.
//!
//! Each command returns the text to print so `main` owns stdout.

pub mod cart;
pub mod catalog;
