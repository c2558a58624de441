//! Error types for hasp.
//!
//! Uses thiserror for derive macros. Every error surfaces to the direct
//! caller; the crate performs no logging, and it never retries storage
//! failures (only "still locked" is retried, inside the acquire wait loop).

use crate::vault::LockRecord;
use thiserror::Error;

/// Main error type for hasp operations.
#[derive(Error, Debug)]
pub enum HaspError {
    /// The object store could not be reached or denied access.
    ///
    /// Not retried by the core; surfaced immediately so the caller can
    /// distinguish an outage from contention.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A stored record exists but failed to deserialize.
    ///
    /// Treated as a corrupt-state condition. The core fails loudly rather
    /// than treating the record as unlocked, since silently overwriting a
    /// corrupt record could mask a real outage.
    #[error("corrupt record: {0}")]
    CorruptRecord(String),

    /// A record failed to serialize for writing.
    #[error("failed to encode record: {0}")]
    EncodeRecord(String),

    /// The lease is held by another identity and remained so for the entire
    /// wait window.
    ///
    /// Carries the last-seen record so the caller can inspect the current
    /// owner and expiry before deciding to retry later or wait longer.
    #[error(
        "lock is held by '{}' until {}",
        .record.owner.as_deref().unwrap_or("unknown"),
        .record.expires_at().format("%Y-%m-%d %H:%M:%S"),
    )]
    AlreadyLocked {
        /// The record observed on the final attempt.
        record: Box<LockRecord>,
    },

    /// A checked release was attempted by an identity that does not hold
    /// the lock.
    #[error(
        "release denied: '{requester}' does not hold the lock (held by {})",
        .held_by.as_deref().unwrap_or("nobody"),
    )]
    NotOwner {
        /// The identity that attempted the release.
        requester: String,
        /// The identity currently recorded as owner, if any.
        held_by: Option<String>,
    },

    /// The caller's cancellation flag was raised while waiting to acquire.
    ///
    /// Distinct from [`HaspError::AlreadyLocked`]: the wait was aborted, not
    /// exhausted.
    #[error("lock acquisition cancelled")]
    Cancelled,
}

/// Result type alias for hasp operations.
pub type Result<T> = std::result::Result<T, HaspError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock;

    #[test]
    fn already_locked_names_the_holder() {
        let record = LockRecord::claim("alice", clock::utc_now(), 900);
        let err = HaspError::AlreadyLocked {
            record: Box::new(record),
        };
        assert!(err.to_string().contains("alice"));
    }

    #[test]
    fn not_owner_is_descriptive() {
        let err = HaspError::NotOwner {
            requester: "bob".to_string(),
            held_by: Some("alice".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("bob"));
        assert!(msg.contains("alice"));

        let err = HaspError::NotOwner {
            requester: "bob".to_string(),
            held_by: None,
        };
        assert!(err.to_string().contains("nobody"));
    }

    #[test]
    fn storage_unavailable_message() {
        let err = HaspError::StorageUnavailable("connection refused".to_string());
        assert_eq!(err.to_string(), "storage unavailable: connection refused");
    }
}
