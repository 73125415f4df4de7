//! The cart reducer.
//!
//! [`CartState`] holds the ordered line items and the derived subtotal. Every
//! mutation recomputes the subtotal before returning, so a caller never sees
//! a stale total. Persistence is layered on top by the storefront crate.

use serde::{Deserialize, Serialize};

use super::id::LineItemId;
use super::line_item::LineItem;
use super::price::Price;

/// What is in the cart.
///
/// Items are unique by id and kept in insertion order. The serialized form is
/// the snapshot format `{ "items": [...], "subtotal": number }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    items: Vec<LineItem>,
    subtotal: Price,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Sum of `price × quantity` over all items.
    #[must_use]
    pub const fn subtotal(&self) -> Price {
        self.subtotal
    }

    /// Look up a line by id.
    #[must_use]
    pub fn get(&self, id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Add a line, or grow the quantity of an existing line with the same id.
    ///
    /// On a duplicate id only the quantity changes; the incoming item's
    /// price, title and other fields are discarded.
    pub fn add_line_item(&mut self, item: LineItem) {
        if let Some(existing) = self.items.iter_mut().find(|line| line.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            self.items.push(item);
        }
        self.recompute_subtotal();
    }

    /// Remove every line with this id. Absent ids are ignored.
    pub fn remove_line_item(&mut self, id: &LineItemId) {
        self.items.retain(|line| &line.id != id);
        self.recompute_subtotal();
    }

    /// Set the quantity of the line with this id. Absent ids are ignored.
    pub fn update_quantity(&mut self, id: &LineItemId, quantity: i64) {
        if let Some(line) = self.items.iter_mut().find(|line| &line.id == id) {
            line.quantity = quantity;
        }
        self.recompute_subtotal();
    }

    /// Recompute the subtotal from the current items.
    pub fn recompute_subtotal(&mut self) {
        self.subtotal = self.items.iter().map(LineItem::line_total).sum();
    }
}
