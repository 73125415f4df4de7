//! Durable storage for the cart snapshot.
//!
//! Two layers:
//! - [`SlotStore`] is a raw key-value namespace of strings. [`FileSlotStore`]
//!   keeps one file per key in a data directory; [`MemorySlotStore`] keeps
//!   them in a map.
//! - [`CartStore`] serializes a [`CartState`] as JSON into the fixed
//!   [`CART_SLOT_KEY`] slot.
//!
//! Every operation returns a `Result`. The cart container logs and ignores
//! failures; the in-memory state stays authoritative.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use nau_core::CartState;
use thiserror::Error;

/// Slot key the cart snapshot is stored under.
pub const CART_SLOT_KEY: &str = "cart";

/// Errors from reading or writing a storage slot.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("Storage I/O error on slot '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    /// The cart could not be serialized.
    #[error("Snapshot serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The slot holds something that is not a cart snapshot.
    #[error("Malformed snapshot in slot '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Key contains characters that cannot name a slot.
    #[error("Invalid slot key: {0:?}")]
    InvalidKey(String),

    /// The backend refused the operation (quota, read-only, ...).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    fn io(key: &str, source: io::Error) -> Self {
        Self::Io {
            key: key.to_string(),
            source,
        }
    }
}

// =============================================================================
// SlotStore
// =============================================================================

/// A local persistent key-value namespace holding string values.
pub trait SlotStore {
    /// Read the value under `key`. `Ok(None)` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the value under `key`. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Slots stored as `<dir>/<key>.json`.
///
/// The directory is created on first write. Writes go to a hidden temporary
/// file which is then renamed over the slot, so a reader sees either the old
/// snapshot or the new one.
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    /// Create a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` unless the key is non-empty ASCII alphanumerics,
    /// `-` or `_`.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SlotStore for FileSlotStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.slot_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.slot_path(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(key, e))?;

        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        std::fs::write(&tmp, value).map_err(|e| StoreError::io(key, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            StoreError::io(key, e)
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.slot_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// Slots held in memory for the lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    slots: HashMap<String, String>,
}

impl MemorySlotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStore for MemorySlotStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.slots.remove(key);
        Ok(())
    }
}

// =============================================================================
// CartStore
// =============================================================================

/// Reads and writes the cart snapshot in a [`SlotStore`].
#[derive(Debug, Clone, Default)]
pub struct CartStore<S> {
    slots: S,
}

impl<S: SlotStore> CartStore<S> {
    #[must_use]
    pub const fn new(slots: S) -> Self {
        Self { slots }
    }

    /// The underlying slot store.
    #[must_use]
    pub const fn slots(&self) -> &S {
        &self.slots
    }

    /// Mutable access to the underlying slot store.
    pub fn slots_mut(&mut self) -> &mut S {
        &mut self.slots
    }

    /// Serialize `state` and write it to the cart slot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&mut self, state: &CartState) -> Result<(), StoreError> {
        let json = serde_json::to_string(state).map_err(StoreError::Serialize)?;
        self.slots.set(CART_SLOT_KEY, &json)
    }

    /// Read the cart slot.
    ///
    /// Returns `Ok(None)` when no snapshot has been saved. The stored subtotal
    /// is discarded and recomputed from the items.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read or does not parse as a
    /// cart snapshot.
    pub fn load(&self) -> Result<Option<CartState>, StoreError> {
        let Some(json) = self.slots.get(CART_SLOT_KEY)? else {
            return Ok(None);
        };
        let mut state: CartState =
            serde_json::from_str(&json).map_err(|source| StoreError::Malformed {
                key: CART_SLOT_KEY.to_string(),
                source,
            })?;
        state.recompute_subtotal();
        Ok(Some(state))
    }

    /// Delete the cart slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be removed.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.slots.remove(CART_SLOT_KEY)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nau_core::{LineItem, LineItemId, Price};

    use super::*;

    fn sample_cart() -> CartState {
        let mut cart = CartState::new();
        cart.add_line_item(LineItem {
            id: LineItemId::new("1"),
            title: "Áo sơ mi".to_string(),
            image: "https://cdn.example.vn/1.jpg".to_string(),
            category: "ao so mi".to_string(),
            price: Price::vnd(100_000),
            quantity: 2,
            stock: 8,
        });
        cart
    }

    #[test]
    fn test_memory_round_trip() {
        let mut store = CartStore::new(MemorySlotStore::new());
        let cart = sample_cart();

        store.save(&cart).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, cart);
        assert_eq!(loaded.subtotal(), Price::vnd(200_000));
    }

    #[test]
    fn test_load_recomputes_stale_subtotal() {
        let mut slots = MemorySlotStore::new();
        slots
            .set(
                CART_SLOT_KEY,
                r#"{"items":[{"id":"A","title":"Vớ","image":"","category":"","price":10,"quantity":3,"stock":0}],"subtotal":1}"#,
            )
            .unwrap();
        let store = CartStore::new(slots);

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.subtotal(), Price::vnd(30));
    }

    #[test]
    fn test_load_empty_slot_is_none() {
        let store = CartStore::new(MemorySlotStore::new());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_load_malformed_snapshot_is_error() {
        let mut slots = MemorySlotStore::new();
        slots.set(CART_SLOT_KEY, "{\"items\": 42}").unwrap();
        let store = CartStore::new(slots);

        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn test_clear_removes_snapshot() {
        let mut store = CartStore::new(MemorySlotStore::new());
        store.save(&sample_cart()).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CartStore::new(FileSlotStore::new(dir.path().join("data")));
        let cart = sample_cart();

        store.save(&cart).unwrap();
        assert!(dir.path().join("data").join("cart.json").exists());
        assert!(!dir.path().join("data").join(".cart.json.tmp").exists());
        assert_eq!(store.load().unwrap(), Some(cart));
    }

    #[test]
    fn test_file_missing_directory_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = CartStore::new(FileSlotStore::new(dir.path().join("never-created")));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_write_into_regular_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let mut store = CartStore::new(FileSlotStore::new(&blocker));
        let err = store.save(&sample_cart()).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn test_file_slot_key_validation() {
        let store = FileSlotStore::new("/tmp/nau");
        assert!(store.slot_path("cart").is_ok());
        assert!(store.slot_path("cart_v2-backup").is_ok());
        assert!(matches!(
            store.slot_path("../etc/passwd"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(store.slot_path(""), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn test_snapshot_is_plain_json() {
        let mut store = CartStore::new(MemorySlotStore::new());
        store.save(&sample_cart()).unwrap();

        let raw = store.slots().get(CART_SLOT_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["items"][0]["id"], "1");
        assert_eq!(value["items"][0]["quantity"], 2);
        assert_eq!(value["subtotal"].as_f64(), Some(200_000.0));
    }
}
