//! Container/key addressing for stored records.

use serde::{Deserialize, Serialize};

/// Location of a single object in a store: a container (bucket, directory)
/// plus a key within it.
///
/// Keys may contain `/` separators; how those are interpreted is the store's
/// concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    /// The container (bucket) holding the object.
    pub container: String,

    /// The key of the object within the container.
    pub key: String,
}

impl Address {
    /// Create an address from a container and key.
    pub fn new(container: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            key: key.into(),
        }
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.container, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_container_and_key() {
        let address = Address::new("my-bucket", "locks/report.json");
        assert_eq!(address.to_string(), "my-bucket/locks/report.json");
    }

    #[test]
    fn addresses_compare_by_value() {
        let a = Address::new("b", "k");
        let b = Address::new("b", "k");
        let c = Address::new("b", "other");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
