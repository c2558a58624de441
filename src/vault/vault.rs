//! The acquire/release state machine.

use super::record::LockRecord;
use crate::clock;
use crate::error::{HaspError, Result};
use crate::state::Backend;
use crate::storage::{Address, ObjectStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Default sleep between acquire attempts while the lock is held.
const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(250);

/// Coordinator for one lock address.
///
/// A `Vault` holds no lock state itself — it is reused across any number of
/// acquire/release calls, and several processes each construct their own
/// `Vault` over the same address to contend for the same lock.
///
/// `acquire` blocks the calling thread for up to the configured wait while
/// retrying, so run it on a thread that can afford to stall. Sharing one
/// `Vault` across threads is safe: the read-decide-write sequence is
/// serialized internally so local threads cannot race each other. The
/// cross-process race inherent to unconditional writes remains (see the
/// [module docs](super)).
pub struct Vault<S> {
    backend: Backend<S, LockRecord>,
    expire: i64,
    wait: Duration,
    retry_interval: Duration,
    /// Serializes read-decide-write for threads sharing this instance.
    serial: Mutex<()>,
}

impl<S: ObjectStore> Vault<S> {
    /// Create a vault for the lock at `address`.
    ///
    /// `expire_seconds` is the default lease duration granted by
    /// [`acquire`](Self::acquire); `wait` bounds how long an acquire keeps
    /// retrying before failing. A zero `wait` means "try exactly once, fail
    /// immediately if contended".
    pub fn new(store: S, address: Address, expire_seconds: i64, wait: Duration) -> Self {
        Self {
            backend: Backend::new(store, address),
            expire: expire_seconds,
            wait,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            serial: Mutex::new(()),
        }
    }

    /// Set the sleep between acquire attempts (default 250ms).
    pub fn retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    /// The address of the lock record.
    pub fn address(&self) -> &Address {
        self.backend.address()
    }

    /// Read the current lock record without trying to acquire.
    ///
    /// First read of a never-written address persists and returns the
    /// unlocked initial record.
    pub fn read(&self) -> Result<LockRecord> {
        self.backend.read()
    }

    /// Acquire the lock as `owner` with the configured lease duration.
    ///
    /// Succeeds immediately when the lock is free, already held by `owner`
    /// (reentrant — the lease is refreshed), or expired. Otherwise retries
    /// until the wait window closes, then fails with
    /// [`HaspError::AlreadyLocked`] carrying the last-seen record.
    ///
    /// Storage errors abort the wait immediately; only "still locked" is
    /// retried.
    pub fn acquire(&self, owner: &str) -> Result<LockRecord> {
        self.acquire_inner(owner, self.expire, None)
    }

    /// Acquire with an explicit lease duration instead of the configured
    /// default.
    pub fn acquire_for(&self, owner: &str, lease_seconds: i64) -> Result<LockRecord> {
        self.acquire_inner(owner, lease_seconds, None)
    }

    /// Acquire as `owner`, aborting the wait when `cancel` becomes true.
    ///
    /// A cancelled wait fails with [`HaspError::Cancelled`], distinct from
    /// [`HaspError::AlreadyLocked`], so callers can tell an aborted wait
    /// from an exhausted one. Cancellation is observed before each attempt,
    /// so it takes effect within one retry interval, and a flag that is
    /// already raised fails the call before any storage I/O.
    pub fn acquire_cancellable(&self, owner: &str, cancel: &AtomicBool) -> Result<LockRecord> {
        self.acquire_inner(owner, self.expire, Some(cancel))
    }

    fn acquire_inner(
        &self,
        owner: &str,
        lease_seconds: i64,
        cancel: Option<&AtomicBool>,
    ) -> Result<LockRecord> {
        let deadline = Instant::now() + self.wait;

        loop {
            if let Some(cancel) = cancel
                && cancel.load(Ordering::Relaxed)
            {
                return Err(HaspError::Cancelled);
            }

            // The critical section is one read-decide-write attempt, not
            // the whole wait: the mutex is dropped before sleeping so other
            // local threads (a reentrant owner above all) can run their own
            // attempts between ours.
            let record = {
                let _serial = self.serial.lock().unwrap_or_else(PoisonError::into_inner);
                let record = self.backend.read()?;
                let now = clock::utc_now();

                if !record.is_locked(now, owner) {
                    let claimed = LockRecord::claim(owner, now, lease_seconds);
                    self.backend.write(&claimed)?;
                    return Ok(claimed);
                }
                record
            };

            let attempt_done = Instant::now();
            if attempt_done >= deadline {
                return Err(HaspError::AlreadyLocked {
                    record: Box::new(record),
                });
            }

            std::thread::sleep(self.retry_interval.min(deadline - attempt_done));
        }
    }

    /// Release the lock described by `record`, trusting the caller.
    ///
    /// Writes a cleared record (`owner = None`, `release_time = now`) with
    /// no ownership check: any holder of a record from a prior successful
    /// acquire may release. This is the base contract for single-writer
    /// workflows; multi-tenant callers should prefer
    /// [`release_checked`](Self::release_checked).
    pub fn release(&self, record: &LockRecord) -> Result<LockRecord> {
        let cleared = record.released(clock::utc_now());
        self.backend.write(&cleared)?;
        Ok(cleared)
    }

    /// Release only if `owner` still holds the lock on storage.
    ///
    /// Re-reads the current record and fails with [`HaspError::NotOwner`]
    /// when it names anyone else (or nobody), so a holder whose lease
    /// expired and was taken over cannot clobber the new owner's lock.
    pub fn release_checked(&self, owner: &str, record: &LockRecord) -> Result<LockRecord> {
        let _serial = self.serial.lock().unwrap_or_else(PoisonError::into_inner);

        let current = self.backend.read()?;
        if current.owner.as_deref() != Some(owner) {
            return Err(HaspError::NotOwner {
                requester: owner.to_string(),
                held_by: current.owner,
            });
        }

        let cleared = record.released(clock::utc_now());
        self.backend.write(&cleared)?;
        Ok(cleared)
    }
}
