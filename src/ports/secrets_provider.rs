// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secrets provider trait definition.
//!
//! This module defines the `SecretsProvider` trait, the port for an aggregate
//! source of zero or more secrets. Providers exist so that groups of related
//! secrets (one store, one vault namespace, one test fixture) can be
//! registered into a configuration source in a single call.

use crate::domain::Result;
use crate::ports::Secret;
use std::sync::Arc;

/// An aggregate source of secrets.
///
/// A provider exposes an ordered list of secrets. Providers are composable:
/// [`CompositeSecretsProvider`](crate::adapters::CompositeSecretsProvider)
/// flattens several child providers into one list.
///
/// Enumeration is fallible because a provider may need to consult an external
/// system to describe its secrets; an error propagates immediately to the
/// caller and is never swallowed at this layer.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`.
///
/// # Examples
///
/// ```rust
/// use secretcfg::ports::{Secret, SecretsProvider};
/// use secretcfg::domain::Result;
/// use std::sync::Arc;
///
/// struct MyProvider {
///     secrets: Vec<Arc<dyn Secret>>,
/// }
///
/// impl SecretsProvider for MyProvider {
///     fn secrets(&self) -> Result<Vec<Arc<dyn Secret>>> {
///         Ok(self.secrets.clone())
///     }
/// }
/// ```
pub trait SecretsProvider: Send + Sync {
    /// Returns all secrets available from this provider, in order.
    ///
    /// The returned handles are cheap clones; the secrets themselves are
    /// shared.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Arc<dyn Secret>>)` - The provider's secrets
    /// * `Err(SecretsError)` - The provider failed to enumerate its secrets
    fn secrets(&self) -> Result<Vec<Arc<dyn Secret>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestSecret {
        key: &'static str,
    }

    impl Secret for TestSecret {
        fn configuration_key(&self) -> &str {
            self.key
        }

        fn get_value(&self) -> Result<String> {
            Ok("value".to_string())
        }
    }

    struct TestProvider {
        secrets: Vec<Arc<dyn Secret>>,
    }

    impl SecretsProvider for TestProvider {
        fn secrets(&self) -> Result<Vec<Arc<dyn Secret>>> {
            Ok(self.secrets.clone())
        }
    }

    #[test]
    fn test_provider_returns_secrets_in_order() {
        let provider = TestProvider {
            secrets: vec![
                Arc::new(TestSecret { key: "first" }),
                Arc::new(TestSecret { key: "second" }),
            ],
        };

        let secrets = provider.secrets().unwrap();
        assert_eq!(secrets.len(), 2);
        assert_eq!(secrets[0].configuration_key(), "first");
        assert_eq!(secrets[1].configuration_key(), "second");
    }

    #[test]
    fn test_provider_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<Box<dyn SecretsProvider>>();
    }
}
