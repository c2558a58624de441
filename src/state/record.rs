//! The capability trait persisted records implement.

use crate::error::{HaspError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A record that can live behind a [`Backend`](super::Backend).
///
/// Implementors supply the value written on first read and, optionally, a
/// custom wire encoding. The default methods encode as JSON, which is what
/// every record in this crate uses; override both `to_bytes` and
/// `from_bytes` together for a different format.
///
/// Decode failures map to [`HaspError::CorruptRecord`] so that a damaged
/// stored record is surfaced loudly instead of being mistaken for an
/// initial/unlocked value.
pub trait StateRecord: Serialize + DeserializeOwned {
    /// The record persisted when the address has never been written.
    fn initial() -> Self;

    /// Encode the record for storage.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| HaspError::EncodeRecord(e.to_string()))
    }

    /// Decode a record from stored bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| HaspError::CorruptRecord(e.to_string()))
    }
}
