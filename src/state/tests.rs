//! Tests for the generic persisted-record layer.

use super::*;
use crate::error::{HaspError, Result};
use crate::storage::{Address, MemoryStore, ObjectStore};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Cursor {
    offset: u64,
}

impl StateRecord for Cursor {
    fn initial() -> Self {
        Cursor { offset: 0 }
    }
}

/// Store that refuses every operation, for error propagation tests.
struct DownStore;

impl ObjectStore for DownStore {
    fn get(&self, address: &Address) -> Result<Option<Vec<u8>>> {
        Err(HaspError::StorageUnavailable(format!(
            "no route to '{}'",
            address
        )))
    }

    fn put(&self, address: &Address, _bytes: &[u8]) -> Result<()> {
        Err(HaspError::StorageUnavailable(format!(
            "no route to '{}'",
            address
        )))
    }
}

#[test]
fn first_read_initializes_and_persists_the_default() {
    let store = MemoryStore::new();
    let address = Address::new("my-bucket", "tracker.json");
    let backend: Backend<_, Cursor> = Backend::new(store.clone(), address.clone());

    // Nothing stored yet.
    assert!(store.get(&address).unwrap().is_none());

    let cursor = backend.read().unwrap();
    assert_eq!(cursor.offset, 0);

    // The read persisted the initial record as a side effect.
    let bytes = store.get(&address).unwrap().unwrap();
    let stored = Cursor::from_bytes(&bytes).unwrap();
    assert_eq!(stored, cursor);
}

#[test]
fn read_after_write_returns_the_written_record() {
    let store = MemoryStore::new();
    let backend: Backend<_, Cursor> =
        Backend::new(store, Address::new("my-bucket", "tracker.json"));

    backend.read().unwrap();
    backend.write(&Cursor { offset: 1 }).unwrap();

    let cursor = backend.read().unwrap();
    assert_eq!(cursor.offset, 1);
}

#[test]
fn repeated_reads_are_idempotent() {
    let store = MemoryStore::new();
    let address = Address::new("my-bucket", "tracker.json");
    let backend: Backend<_, Cursor> = Backend::new(store.clone(), address.clone());

    let first = backend.read().unwrap();
    let bytes_after_first = store.get(&address).unwrap().unwrap();

    let second = backend.read().unwrap();
    let bytes_after_second = store.get(&address).unwrap().unwrap();

    assert_eq!(first, second);
    assert_eq!(bytes_after_first, bytes_after_second);
}

#[test]
fn corrupt_stored_bytes_fail_loudly() {
    let store = MemoryStore::new();
    let address = Address::new("my-bucket", "tracker.json");
    store.put(&address, b"not json at all").unwrap();

    let backend: Backend<_, Cursor> = Backend::new(store, address);
    let err = backend.read().unwrap_err();

    assert!(matches!(err, HaspError::CorruptRecord(_)));
    // The error names the address so the operator can find the object.
    assert!(err.to_string().contains("my-bucket/tracker.json"));
}

#[test]
fn storage_failure_propagates_from_read() {
    let backend: Backend<_, Cursor> =
        Backend::new(DownStore, Address::new("my-bucket", "tracker.json"));
    let err = backend.read().unwrap_err();
    assert!(matches!(err, HaspError::StorageUnavailable(_)));
}

#[test]
fn tracker_store_mirrors_the_backend_contract() {
    let store = MemoryStore::new();
    let tracker: TrackerStore<_, Cursor> =
        TrackerStore::new(store, Address::new("my-bucket", "tracker.json"));

    let cursor = tracker.read().unwrap();
    assert_eq!(cursor.offset, 0);

    tracker.write(&Cursor { offset: 42 }).unwrap();
    assert_eq!(tracker.read().unwrap().offset, 42);

    assert_eq!(tracker.address().key, "tracker.json");
}
