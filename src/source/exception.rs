// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exception context and callback types for the reload protocol.
//!
//! When a secret fails to fetch during a load, the provider wraps the failure
//! in a [`SecretExceptionContext`] and hands it to the registered
//! [`SecretExceptionHook`]. When a load changes any cached value, the provider
//! invokes the registered [`ReloadCallback`] so the owning configuration
//! hierarchy can re-bind derived values.

use crate::domain::SecretsError;
use crate::ports::Secret;
use std::sync::Arc;

/// Callback invoked when a secret fails to fetch during a load.
///
/// The hook is called once per failing secret, in secret order. A hook that
/// panics aborts the current load (the timer keeps running; see
/// [`SecretsConfigurationProvider::load`]).
///
/// [`SecretsConfigurationProvider::load`]: crate::source::SecretsConfigurationProvider::load
pub type SecretExceptionHook = Arc<dyn Fn(SecretExceptionContext<'_>) + Send + Sync>;

/// Callback invoked when a load changed at least one cached value.
pub type ReloadCallback = Arc<dyn Fn() + Send + Sync>;

/// Information about a secret that failed to fetch.
///
/// Pairs the failing secret with the error it produced and the name of the
/// provider that was loading it.
///
/// # Examples
///
/// ```
/// use secretcfg::source::{SecretExceptionContext, SecretExceptionHook};
/// use std::sync::Arc;
///
/// let hook: SecretExceptionHook = Arc::new(|context: SecretExceptionContext<'_>| {
///     eprintln!(
///         "secret '{}' failed in provider '{}': {}",
///         context.secret().configuration_key(),
///         context.provider_name(),
///         context.error(),
///     );
/// });
/// # let _ = hook;
/// ```
pub struct SecretExceptionContext<'a> {
    provider_name: &'a str,
    secret: &'a dyn Secret,
    error: &'a SecretsError,
}

impl<'a> SecretExceptionContext<'a> {
    pub(crate) fn new(
        provider_name: &'a str,
        secret: &'a dyn Secret,
        error: &'a SecretsError,
    ) -> Self {
        Self {
            provider_name,
            secret,
            error,
        }
    }

    /// The name of the provider that invoked the failing fetch.
    pub fn provider_name(&self) -> &'a str {
        self.provider_name
    }

    /// The secret whose fetch failed.
    pub fn secret(&self) -> &'a dyn Secret {
        self.secret
    }

    /// The error the fetch produced.
    pub fn error(&self) -> &'a SecretsError {
        self.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::StaticSecret;

    #[test]
    fn test_context_accessors() {
        let secret = StaticSecret::new("app.token", "x");
        let error = SecretsError::SecretNotFound {
            secret_id: "prod/token".to_string(),
            secret_key: None,
            configuration_key: "app.token".to_string(),
        };

        let context = SecretExceptionContext::new("secrets", &secret, &error);

        assert_eq!(context.provider_name(), "secrets");
        assert_eq!(context.secret().configuration_key(), "app.token");
        assert!(context.error().to_string().contains("prod/token"));
    }

    #[test]
    fn test_hook_receives_context() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);

        let hook: SecretExceptionHook = Arc::new(move |context| {
            assert_eq!(context.provider_name(), "secrets");
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        let secret = StaticSecret::new("app.token", "x");
        let error = SecretsError::EmptySecretKey { index: 0 };
        hook(SecretExceptionContext::new("secrets", &secret, &error));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
