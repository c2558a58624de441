//! Owner identity helpers.
//!
//! Lock owners are free-form strings; any stable identity works. For
//! processes that do not carry an application-level identity, this module
//! derives a `user@host` string from the environment.

/// Build a `user@host` identity string for the current process.
///
/// Falls back to `unknown` for either half when the environment does not
/// provide it, so the result is always usable as an owner string.
pub fn default_owner() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_owner_has_user_and_host() {
        let owner = default_owner();
        assert!(owner.contains('@'));
        assert!(!owner.starts_with('@'));
        assert!(!owner.ends_with('@'));
    }
}
