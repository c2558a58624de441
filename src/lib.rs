//! Hasp: lease-based advisory locks over shared object storage.
//!
//! Hasp coordinates mutually-exclusive access to a shared resource (a
//! single-writer file, a batch job slot) across processes or machines that
//! have no channel to each other except a common bucket/key-addressed object
//! store. There is no lock server and no consensus protocol: coordination is
//! derived entirely from reads and writes of a small JSON record at a
//! well-known address.
//!
//! # Components
//!
//! - [`ObjectStore`] — the storage collaborator boundary: `get`/`put` of raw
//!   bytes at an [`Address`]. [`MemoryStore`] and [`FsStore`] are provided;
//!   cloud stores plug in by implementing the trait.
//! - [`Backend`] — generic read/write of a single [`StateRecord`] at an
//!   address, with create-default-on-first-read semantics.
//! - [`Vault`] — the acquire/release lease protocol built on `Backend`,
//!   with bounded retry-and-wait, clock-based expiration, and owner
//!   reentrancy.
//! - [`TrackerStore`] — the same backend specialized for arbitrary persisted
//!   progress/offset records, with no lock semantics.
//!
//! # Quick Start
//!
//! ```no_run
//! use hasp::{Address, FsStore, Vault};
//! use std::time::Duration;
//!
//! # fn main() -> hasp::Result<()> {
//! let store = FsStore::new("/var/lib/hasp")?;
//! let address = Address::new("jobs", "nightly-report.lock");
//!
//! // 15 minute lease, retry for up to 30 seconds before giving up.
//! let vault = Vault::new(store, address, 900, Duration::from_secs(30));
//!
//! let lock = vault.acquire("reporter@worker-1")?;
//! // ... exclusive work ...
//! vault.release(&lock)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Consistency caveat
//!
//! This is an *advisory* lock. The protocol assumes the backing store offers
//! at least read-after-write consistency on the lock key, and it does not use
//! conditional writes: two processes that both observe the lock as free can
//! both claim it, last writer wins. See [`Backend`] for the full discussion.

pub mod clock;
pub mod error;
pub mod identity;
pub mod state;
pub mod storage;
pub mod vault;

pub use error::{HaspError, Result};
pub use state::{Backend, StateRecord, TrackerStore};
pub use storage::{Address, FsStore, MemoryStore, ObjectStore};
pub use vault::{LockRecord, Vault};
