//! The persisted lock record and its held/free predicate.

use crate::state::StateRecord;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Wire format for `lock_time` and `release_time`.
const WIRE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The persisted state of one lock.
///
/// Pure data plus predicate logic; records never mutate themselves. New
/// records are constructed by [`Vault`](super::Vault) on acquire and
/// release, and by [`StateRecord::initial`] on the first read of a
/// never-written address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRecord {
    /// Identity of the current lease holder; `None` means the lock is free.
    pub owner: Option<String>,

    /// When the current owner acquired the lease (UTC, second precision).
    #[serde(with = "wire_time")]
    pub lock_time: DateTime<Utc>,

    /// When the lease was explicitly released; `None` while held.
    #[serde(with = "wire_time_opt")]
    pub release_time: Option<DateTime<Utc>>,

    /// Lease duration in seconds from `lock_time`.
    pub expire: i64,
}

impl LockRecord {
    /// Build the record written by a successful acquire.
    pub(crate) fn claim(owner: &str, now: DateTime<Utc>, expire: i64) -> Self {
        Self {
            owner: Some(owner.to_string()),
            lock_time: now,
            release_time: None,
            expire,
        }
    }

    /// Build the record written by a release: ownership cleared, the
    /// original `lock_time` and `expire` kept for the audit trail.
    pub(crate) fn released(&self, now: DateTime<Utc>) -> Self {
        Self {
            owner: None,
            lock_time: self.lock_time,
            release_time: Some(now),
            expire: self.expire,
        }
    }

    /// The instant the lease lapses on its own.
    ///
    /// `expire` is an unbounded `i64`, so the deadline is computed with
    /// checked arithmetic and clamps instead of overflowing: a lease past
    /// the calendar horizon never expires, a hugely negative one is already
    /// expired.
    pub fn expires_at(&self) -> DateTime<Utc> {
        Duration::try_seconds(self.expire)
            .and_then(|lease| self.lock_time.checked_add_signed(lease))
            .unwrap_or(if self.expire >= 0 {
                DateTime::<Utc>::MAX_UTC
            } else {
                DateTime::<Utc>::MIN_UTC
            })
    }

    /// Whether the lock is held *against* `requester` at `now`.
    ///
    /// Free (`false`) when:
    /// - `owner` is `None` — free for everyone, regardless of the other
    ///   fields;
    /// - `owner` is `requester` — the holder never blocks on itself
    ///   (reentrancy);
    /// - `now >= lock_time + expire` — the lease lapsed, so a stale lock
    ///   self-heals without the original owner ever releasing it.
    ///
    /// `release_time` plays no part: expiration is evaluated purely from
    /// `lock_time` and `expire`.
    pub fn is_locked(&self, now: DateTime<Utc>, requester: &str) -> bool {
        match self.owner.as_deref() {
            None => false,
            Some(owner) if owner == requester => false,
            Some(_) => now < self.expires_at(),
        }
    }
}

impl StateRecord for LockRecord {
    /// A never-locked record: no owner, epoch `lock_time`, zero lease.
    fn initial() -> Self {
        Self {
            owner: None,
            lock_time: DateTime::UNIX_EPOCH,
            release_time: None,
            expire: 0,
        }
    }
}

mod wire_time {
    //! Serde glue for the `%Y-%m-%d %H:%M:%S` UTC wire format.

    use super::WIRE_TIME_FORMAT;
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(
        time: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(WIRE_TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).map_err(de::Error::custom)
    }

    pub(super) fn parse(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        NaiveDateTime::parse_from_str(text, WIRE_TIME_FORMAT).map(|naive| naive.and_utc())
    }
}

mod wire_time_opt {
    //! Same as `wire_time`, with `None` on the wire as `null` (never
    //! skipped — absent and null must read back identically).

    use super::{WIRE_TIME_FORMAT, wire_time};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(
        time: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => serializer.serialize_some(&time.format(WIRE_TIME_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => wire_time::parse(&text)
                .map(Some)
                .map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}
