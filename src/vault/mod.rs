//! Lease-based lock protocol over object storage.
//!
//! A lock is one JSON record at a well-known address. Holding the lock means
//! being named as `owner` in that record while the lease is still running;
//! nothing else is written anywhere, and no server arbitrates.
//!
//! # Lock Record
//!
//! The persisted record carries four fields (names are the wire format and
//! must not change):
//! - `owner`: who holds the lease, `null` when free
//! - `lock_time`: UTC second-precision timestamp of the acquisition
//! - `release_time`: UTC timestamp of the explicit release, `null` while held
//! - `expire`: lease duration in seconds
//!
//! # Protocol
//!
//! Acquire reads the record, evaluates [`LockRecord::is_locked`] against the
//! current clock, and either claims by overwriting the record or sleeps and
//! retries within a bounded wait window. Expiration is a derived predicate:
//! a stale lease self-heals the next time anyone evaluates it, with no
//! background sweeper and no "expired" state on storage. Release overwrites
//! the record with `owner` cleared; the key persists forever.
//!
//! # Known race
//!
//! Writes are unconditional, so two processes that concurrently observe the
//! lock as free can both claim it (see [`Backend`](crate::Backend)). In
//! well-behaved deployments with realistic lease durations this window is
//! narrow, but it exists; callers needing a hard guarantee must bring a
//! store with conditional writes.

mod record;
#[allow(clippy::module_inception)]
mod vault;


pub use record::LockRecord;
pub use vault::Vault;
