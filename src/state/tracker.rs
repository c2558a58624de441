//! Generic persisted progress/offset records.

use super::backend::Backend;
use super::record::StateRecord;
use crate::error::Result;
use crate::storage::{Address, ObjectStore};

/// Persistence for an application-defined progress record (a processing
/// offset, a cursor, a high-water mark) at a fixed address.
///
/// This is the same read/write-with-default pattern the lock protocol is
/// built on, specialized for records with no locking semantics: nothing here
/// grants exclusivity. A caller that needs exclusive access to the tracked
/// state composes a `TrackerStore` with a [`Vault`](crate::Vault) keyed at a
/// related address.
///
/// ```no_run
/// use hasp::{Address, MemoryStore, StateRecord, TrackerStore};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct Cursor {
///     offset: u64,
/// }
///
/// impl StateRecord for Cursor {
///     fn initial() -> Self {
///         Cursor { offset: 0 }
///     }
/// }
///
/// # fn main() -> hasp::Result<()> {
/// let store = MemoryStore::new();
/// let tracker = TrackerStore::new(store, Address::new("jobs", "cursor.json"));
///
/// let mut cursor: Cursor = tracker.read()?; // first read persists offset 0
/// cursor.offset += 100;
/// tracker.write(&cursor)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TrackerStore<S, R> {
    backend: Backend<S, R>,
}

impl<S: ObjectStore, R: StateRecord> TrackerStore<S, R> {
    /// Create a tracker for `address` on `store`.
    pub fn new(store: S, address: Address) -> Self {
        Self {
            backend: Backend::new(store, address),
        }
    }

    /// The address the tracker persists to.
    pub fn address(&self) -> &Address {
        self.backend.address()
    }

    /// Read the current record, persisting `R::initial()` on first use.
    pub fn read(&self) -> Result<R> {
        self.backend.read()
    }

    /// Overwrite the persisted record.
    pub fn write(&self, record: &R) -> Result<()> {
        self.backend.write(record)
    }
}
