// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret trait definition.
//!
//! This module defines the `Secret` trait, the primary port (interface) for a
//! single fetchable secret. Any secret-bearing capability (a secrets-manager
//! entry, a vault path, a fixed test value, etc.) must implement this trait.

use crate::domain::Result;

/// A named, fetchable piece of sensitive configuration data.
///
/// Each secret maps one configuration key to a value fetched on demand.
/// Fetching may fail; the configuration provider isolates such failures per
/// secret, so an implementation should not retry internally unless the
/// backing client already does.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; secrets are shared with the
/// background reload timer as `Arc<dyn Secret>`.
///
/// # Examples
///
/// ```rust
/// use secretcfg::ports::Secret;
/// use secretcfg::domain::Result;
///
/// struct MySecret;
///
/// impl Secret for MySecret {
///     fn configuration_key(&self) -> &str {
///         "app.token"
///     }
///
///     fn get_value(&self) -> Result<String> {
///         Ok("sekrit".to_string())
///     }
/// }
/// ```
pub trait Secret: Send + Sync {
    /// Returns the configuration key this secret's value is exposed under.
    ///
    /// Keys must be non-empty and unique within a source under
    /// case-insensitive comparison; both invariants are enforced when the
    /// owning source is built.
    fn configuration_key(&self) -> &str;

    /// Fetches the current value of the secret.
    ///
    /// This may be a blocking call over a network boundary. Retry and backoff
    /// policy, if any, belongs to the backing client, not to this trait.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The current secret value
    /// * `Err(SecretsError)` - The fetch failed or the store held no value
    fn get_value(&self) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestSecret {
        key: String,
        value: String,
    }

    impl Secret for TestSecret {
        fn configuration_key(&self) -> &str {
            &self.key
        }

        fn get_value(&self) -> Result<String> {
            Ok(self.value.clone())
        }
    }

    #[test]
    fn test_secret_configuration_key() {
        let secret = TestSecret {
            key: "app.token".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(secret.configuration_key(), "app.token");
    }

    #[test]
    fn test_secret_get_value() {
        let secret = TestSecret {
            key: "app.token".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(secret.get_value().unwrap(), "abc");
    }

    #[test]
    fn test_secret_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<Box<dyn Secret>>();
    }
}
