//! Read/write of one record at one address.

use super::record::StateRecord;
use crate::error::{HaspError, Result};
use crate::storage::{Address, ObjectStore};
use std::marker::PhantomData;

/// Generic persistence for a single [`StateRecord`] at a fixed [`Address`].
///
/// # Read is not side-effect-free
///
/// The first `read` of a never-written address *writes*: it persists
/// `R::initial()` at the address and returns it, so the record exists from
/// then on. This first-read-wins initialization is part of the contract,
/// not an implementation detail — callers and tests should expect the
/// object to appear after a read.
///
/// # No conditional writes
///
/// `write` is an unconditional overwrite; there is no compare-and-swap
/// token. Two concurrent writers that both read the same prior state can
/// both write, and the last one wins at the storage layer. The lock
/// protocol in [`crate::vault`] layers its safety on top of this and
/// documents the residual race; a store that offers preconditioned puts
/// (an ETag-conditioned write) can close it in its `ObjectStore` impl.
#[derive(Debug, Clone)]
pub struct Backend<S, R> {
    store: S,
    address: Address,
    _record: PhantomData<R>,
}

impl<S: ObjectStore, R: StateRecord> Backend<S, R> {
    /// Create a backend for `address` on `store`.
    pub fn new(store: S, address: Address) -> Self {
        Self {
            store,
            address,
            _record: PhantomData,
        }
    }

    /// The address this backend reads and writes.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Read the record, initializing the address with `R::initial()` if it
    /// has never been written (see the type-level docs).
    ///
    /// Storage failures and decode failures propagate; a missing object is
    /// the only condition handled here.
    pub fn read(&self) -> Result<R> {
        match self.store.get(&self.address)? {
            Some(bytes) => R::from_bytes(&bytes).map_err(|e| match e {
                HaspError::CorruptRecord(reason) => {
                    HaspError::CorruptRecord(format!("{}: {}", self.address, reason))
                }
                other => other,
            }),
            None => {
                let record = R::initial();
                self.write(&record)?;
                Ok(record)
            }
        }
    }

    /// Serialize and overwrite the record at the address.
    pub fn write(&self, record: &R) -> Result<()> {
        let bytes = record.to_bytes()?;
        self.store.put(&self.address, &bytes)
    }
}
