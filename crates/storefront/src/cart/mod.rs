//! Cart container.
//!
//! [`Cart`] owns the [`CartState`] for one client session and the
//! [`CartStore`] it is persisted to. Every mutation is applied in memory,
//! the subtotal is recomputed, and the snapshot is written before the call
//! returns.
//!
//! Persistence is best-effort. A failed write is logged and reported as
//! [`Persistence::Failed`], which callers are free to ignore; the in-memory
//! cart is unaffected either way.
//!
//! # Example
//!
//! ```rust,no_run
//! use nau_core::{LineItem, LineItemId, Price};
//! use nau_storefront::cart::Cart;
//!
//! let mut cart = Cart::open(".nau");
//! cart.add_line_item(LineItem {
//!     id: LineItemId::new("1"),
//!     title: "Áo thun".to_string(),
//!     image: "https://cdn.example.vn/ao.jpg".to_string(),
//!     category: "ao thun".to_string(),
//!     price: Price::vnd(100_000),
//!     quantity: 2,
//!     stock: 10,
//! });
//! assert_eq!(cart.subtotal(), Price::vnd(200_000));
//! ```

pub mod store;

use std::path::PathBuf;

use nau_core::{CartState, LineItem, LineItemId, Price};

pub use store::{
    CART_SLOT_KEY, CartStore, FileSlotStore, MemorySlotStore, SlotStore, StoreError,
};

/// Outcome of the persistence attempt that follows a mutation.
#[derive(Debug)]
pub enum Persistence {
    /// The snapshot was written.
    Saved,
    /// The write failed; the in-memory cart is still correct.
    Failed(StoreError),
}

impl Persistence {
    /// Whether the snapshot reached storage.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }

    /// The storage error, if the write failed.
    #[must_use]
    pub const fn error(&self) -> Option<&StoreError> {
        match self {
            Self::Saved => None,
            Self::Failed(e) => Some(e),
        }
    }
}

/// The cart for one client session.
#[derive(Debug)]
pub struct Cart<S: SlotStore> {
    state: CartState,
    store: CartStore<S>,
}

impl Cart<FileSlotStore> {
    /// Restore the cart persisted in `data_dir`, or start empty.
    #[must_use]
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        Self::restore(CartStore::new(FileSlotStore::new(data_dir)))
    }
}

impl<S: SlotStore> Cart<S> {
    /// Restore from `store`, falling back to an empty cart.
    ///
    /// An empty slot, an unreadable slot and a malformed snapshot all yield an
    /// empty cart. `CartStore::load` recomputes the stored subtotal.
    pub fn restore(store: CartStore<S>) -> Self {
        let state = match store.load() {
            Ok(Some(state)) => {
                tracing::debug!(lines = state.items().len(), "Restored cart snapshot");
                state
            }
            Ok(None) => CartState::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable cart snapshot");
                CartState::new()
            }
        };
        Self { state, store }
    }

    /// The current cart contents.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.state.items()
    }

    #[must_use]
    pub const fn subtotal(&self) -> Price {
        self.state.subtotal()
    }

    #[must_use]
    pub fn get(&self, id: &LineItemId) -> Option<&LineItem> {
        self.state.get(id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.state.item_count()
    }

    /// The store this cart persists to.
    #[must_use]
    pub const fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// Add a line or grow an existing one, then persist.
    pub fn add_line_item(&mut self, item: LineItem) -> Persistence {
        tracing::debug!(line_id = %item.id, quantity = item.quantity, "Adding to cart");
        self.state.add_line_item(item);
        self.persist()
    }

    /// Remove a line, then persist.
    pub fn remove_line_item(&mut self, id: &LineItemId) -> Persistence {
        tracing::debug!(line_id = %id, "Removing from cart");
        self.state.remove_line_item(id);
        self.persist()
    }

    /// Set a line's quantity, then persist.
    pub fn update_quantity(&mut self, id: &LineItemId, quantity: i64) -> Persistence {
        tracing::debug!(line_id = %id, quantity, "Updating cart quantity");
        self.state.update_quantity(id, quantity);
        self.persist()
    }

    /// Recompute the subtotal. Does not write to storage.
    pub fn recompute_subtotal(&mut self) {
        self.state.recompute_subtotal();
    }

    /// Empty the cart and delete its snapshot.
    pub fn clear(&mut self) -> Persistence {
        self.state = CartState::new();
        match self.store.clear() {
            Ok(()) => Persistence::Saved,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to clear cart snapshot");
                Persistence::Failed(e)
            }
        }
    }

    fn persist(&mut self) -> Persistence {
        match self.store.save(&self.state) {
            Ok(()) => Persistence::Saved,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to persist cart snapshot");
                Persistence::Failed(e)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Slot store whose writes can be made to fail.
    #[derive(Debug, Default)]
    struct FlakySlotStore {
        inner: MemorySlotStore,
        fail_writes: bool,
        writes: usize,
    }

    impl SlotStore for FlakySlotStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.writes += 1;
            if self.fail_writes {
                return Err(StoreError::Unavailable("quota exceeded".to_string()));
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            if self.fail_writes {
                return Err(StoreError::Unavailable("read-only".to_string()));
            }
            self.inner.remove(key)
        }
    }

    fn item(id: &str, price: i64, quantity: i64) -> LineItem {
        LineItem {
            id: LineItemId::new(id),
            title: format!("Sản phẩm {id}"),
            image: format!("https://cdn.example.vn/{id}.jpg"),
            category: "phu kien".to_string(),
            price: Price::vnd(price),
            quantity,
            stock: 50,
        }
    }

    fn memory_cart() -> Cart<MemorySlotStore> {
        Cart::restore(CartStore::new(MemorySlotStore::new()))
    }

    #[test]
    fn test_restore_from_empty_store() {
        let cart = memory_cart();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Price::ZERO);
    }

    #[test]
    fn test_every_mutation_persists() {
        let mut cart = memory_cart();

        assert!(cart.add_line_item(item("A", 10, 1)).is_saved());
        assert_eq!(cart.store().load().unwrap().as_ref(), Some(cart.state()));

        assert!(cart.update_quantity(&LineItemId::new("A"), 4).is_saved());
        assert_eq!(cart.store().load().unwrap().as_ref(), Some(cart.state()));

        assert!(cart.remove_line_item(&LineItemId::new("A")).is_saved());
        assert_eq!(cart.store().load().unwrap().as_ref(), Some(cart.state()));
    }

    #[test]
    fn test_noop_mutations_still_persist() {
        let mut store = CartStore::new(FlakySlotStore::default());
        store.save(&CartState::new()).unwrap();
        let mut cart = Cart::restore(store);

        cart.remove_line_item(&LineItemId::new("missing"));
        cart.update_quantity(&LineItemId::new("missing"), 3);
        assert_eq!(cart.store().slots().writes, 3);
    }

    #[test]
    fn test_recompute_does_not_persist() {
        let mut cart = Cart::restore(CartStore::new(FlakySlotStore::default()));
        cart.recompute_subtotal();
        assert_eq!(cart.store().slots().writes, 0);
    }

    #[test]
    fn test_failed_writes_leave_memory_correct() {
        let flaky = FlakySlotStore {
            fail_writes: true,
            ..FlakySlotStore::default()
        };
        let mut cart = Cart::restore(CartStore::new(flaky));

        let outcome = cart.add_line_item(item("A", 10, 1));
        assert!(matches!(
            outcome.error(),
            Some(StoreError::Unavailable(_))
        ));
        cart.add_line_item(item("A", 999, 2));
        cart.add_line_item(item("B", 5, 4));
        cart.update_quantity(&LineItemId::new("B"), 2);

        assert_eq!(cart.get(&LineItemId::new("A")).unwrap().quantity, 3);
        assert_eq!(cart.subtotal(), Price::vnd(40));
        assert!(cart.store().load().unwrap().is_none());
    }

    #[test]
    fn test_failed_clear_still_empties_memory() {
        let mut cart = Cart::restore(CartStore::new(FlakySlotStore::default()));
        cart.add_line_item(item("A", 10, 1));
        cart.store.slots_mut().fail_writes = true;

        assert!(!cart.clear().is_saved());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_restore_recomputes_stale_subtotal() {
        let mut slots = MemorySlotStore::new();
        slots
            .set(
                CART_SLOT_KEY,
                r#"{"items":[{"id":"A","title":"t","image":"i","category":"c","price":10,"quantity":3,"stock":5}],"subtotal":0}"#,
            )
            .unwrap();

        let cart = Cart::restore(CartStore::new(slots));
        assert_eq!(cart.subtotal(), Price::vnd(30));
    }

    #[test]
    fn test_restore_malformed_snapshot_starts_empty() {
        let mut slots = MemorySlotStore::new();
        slots.set(CART_SLOT_KEY, "not json at all").unwrap();

        let cart = Cart::restore(CartStore::new(slots));
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Price::ZERO);
    }

    #[test]
    fn test_checkout_scenario() {
        let mut cart = memory_cart();

        cart.add_line_item(item("1", 100_000, 2));
        cart.add_line_item(item("2", 50_000, 1));
        assert_eq!(cart.subtotal(), Price::vnd(250_000));

        cart.update_quantity(&LineItemId::new("1"), 1);
        assert_eq!(cart.subtotal(), Price::vnd(150_000));

        cart.remove_line_item(&LineItemId::new("2"));
        assert_eq!(cart.items().len(), 1);
        let line = cart.items().first().unwrap();
        assert_eq!(line.id.as_str(), "1");
        assert_eq!(line.quantity, 1);
        assert_eq!(cart.subtotal(), Price::vnd(100_000));
    }
}
