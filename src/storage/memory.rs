//! In-process object store.

use super::{Address, ObjectStore};
use crate::error::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// An [`ObjectStore`] backed by an in-process map.
///
/// Cloning a `MemoryStore` yields a handle to the same underlying map, so
/// several components (a `Vault` and a `TrackerStore`, or two simulated
/// processes in a test) can share one store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: Arc<Mutex<HashMap<Address, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectStore for MemoryStore {
    fn get(&self, address: &Address) -> Result<Option<Vec<u8>>> {
        let objects = self
            .objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(objects.get(address).cloned())
    }

    fn put(&self, address: &Address, bytes: &[u8]) -> Result<()> {
        let mut objects = self
            .objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        objects.insert(address.clone(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_returns_none() {
        let store = MemoryStore::new();
        let address = Address::new("bucket", "missing.json");
        assert!(store.get(&address).unwrap().is_none());
    }

    #[test]
    fn put_then_get_round_trips() {
        let store = MemoryStore::new();
        let address = Address::new("bucket", "data.json");

        store.put(&address, b"{\"offset\":1}").unwrap();
        let bytes = store.get(&address).unwrap().unwrap();
        assert_eq!(bytes, b"{\"offset\":1}");
    }

    #[test]
    fn put_overwrites_existing_object() {
        let store = MemoryStore::new();
        let address = Address::new("bucket", "data.json");

        store.put(&address, b"first").unwrap();
        store.put(&address, b"second").unwrap();

        let bytes = store.get(&address).unwrap().unwrap();
        assert_eq!(bytes, b"second");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clones_share_the_same_objects() {
        let store = MemoryStore::new();
        let handle = store.clone();
        let address = Address::new("bucket", "shared.json");

        store.put(&address, b"payload").unwrap();
        assert_eq!(handle.get(&address).unwrap().unwrap(), b"payload");
    }
}
