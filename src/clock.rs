//! Canonical timestamp source for all lease math.
//!
//! Every expiration comparison in the crate happens in UTC at second
//! precision. Sub-second digits are truncated rather than rounded so the
//! persisted wire format and in-memory comparisons always agree.

use chrono::{DateTime, SubsecRound, Utc};

/// Current UTC time, truncated to whole seconds.
pub fn utc_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn utc_now_has_no_subsecond_component() {
        let now = utc_now();
        assert_eq!(now.nanosecond(), 0);
    }

    #[test]
    fn utc_now_is_monotonic_enough() {
        let a = utc_now();
        let b = utc_now();
        assert!(b >= a);
    }
}
