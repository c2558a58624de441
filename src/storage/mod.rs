//! Object-store collaborator boundary.
//!
//! Everything above this module speaks [`ObjectStore`]: synchronous `get` and
//! `put` of raw bytes at a container/key [`Address`]. Cloud blob services,
//! shared filesystems, and in-process maps all fit behind the same trait; the
//! lock protocol makes no assumption beyond read-after-write consistency on
//! the addresses it touches.
//!
//! Two implementations ship with the crate:
//!
//! - [`MemoryStore`] — in-process, for tests and single-process use
//! - [`FsStore`] — a directory tree, with atomic replace on write

mod address;
mod fs;
mod memory;

pub use address::Address;
pub use fs::FsStore;
pub use memory::MemoryStore;

use crate::error::Result;
use std::sync::Arc;

/// Synchronous byte storage addressed by container and key.
///
/// Both operations fail with
/// [`StorageUnavailable`](crate::HaspError::StorageUnavailable) on transport
/// or permission errors. A missing object is not an error: `get` reports it
/// as `Ok(None)` so callers can distinguish "absent" from "unreachable".
pub trait ObjectStore {
    /// Fetch the object at `address`, or `None` if it does not exist.
    fn get(&self, address: &Address) -> Result<Option<Vec<u8>>>;

    /// Write `bytes` to `address`, unconditionally overwriting any existing
    /// object. Last writer wins at this layer.
    fn put(&self, address: &Address, bytes: &[u8]) -> Result<()>;
}

impl<S: ObjectStore + ?Sized> ObjectStore for &S {
    fn get(&self, address: &Address) -> Result<Option<Vec<u8>>> {
        (**self).get(address)
    }

    fn put(&self, address: &Address, bytes: &[u8]) -> Result<()> {
        (**self).put(address, bytes)
    }
}

impl<S: ObjectStore + ?Sized> ObjectStore for Arc<S> {
    fn get(&self, address: &Address) -> Result<Option<Vec<u8>>> {
        (**self).get(address)
    }

    fn put(&self, address: &Address, bytes: &[u8]) -> Result<()> {
        (**self).put(address, bytes)
    }
}
