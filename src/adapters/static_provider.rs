// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-value secrets and a fixed-list provider.
//!
//! These adapters carry values known at construction time. They are the
//! simplest [`Secret`]/[`SecretsProvider`] implementations and are used for
//! wiring defaults and in tests.

use crate::domain::Result;
use crate::ports::{Secret, SecretsProvider};
use std::fmt;
use std::sync::Arc;

/// A secret whose value is fixed at construction time.
///
/// The `Debug` implementation never prints the value.
///
/// # Examples
///
/// ```
/// use secretcfg::adapters::StaticSecret;
/// use secretcfg::ports::Secret;
///
/// let secret = StaticSecret::new("app.token", "sekrit");
/// assert_eq!(secret.configuration_key(), "app.token");
/// assert_eq!(secret.get_value().unwrap(), "sekrit");
/// ```
#[derive(Clone)]
pub struct StaticSecret {
    configuration_key: String,
    value: String,
}

impl StaticSecret {
    /// Creates a new fixed-value secret.
    pub fn new(configuration_key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            configuration_key: configuration_key.into(),
            value: value.into(),
        }
    }
}

impl Secret for StaticSecret {
    fn configuration_key(&self) -> &str {
        &self.configuration_key
    }

    fn get_value(&self) -> Result<String> {
        Ok(self.value.clone())
    }
}

impl fmt::Debug for StaticSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticSecret")
            .field("configuration_key", &self.configuration_key)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// A provider backed by a fixed list of secrets.
///
/// # Examples
///
/// ```
/// use secretcfg::adapters::{StaticSecret, StaticSecretsProvider};
/// use secretcfg::ports::SecretsProvider;
/// use std::sync::Arc;
///
/// let provider = StaticSecretsProvider::new()
///     .with_secret(Arc::new(StaticSecret::new("a", "1")))
///     .with_secret(Arc::new(StaticSecret::new("b", "2")));
///
/// assert_eq!(provider.secrets().unwrap().len(), 2);
/// ```
#[derive(Default)]
pub struct StaticSecretsProvider {
    secrets: Vec<Arc<dyn Secret>>,
}

impl StaticSecretsProvider {
    /// Creates a provider with no secrets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider from an existing list of secrets.
    pub fn from_secrets(secrets: Vec<Arc<dyn Secret>>) -> Self {
        Self { secrets }
    }

    /// Appends a secret, consuming and returning the provider for chaining.
    pub fn with_secret(mut self, secret: Arc<dyn Secret>) -> Self {
        self.secrets.push(secret);
        self
    }
}

impl SecretsProvider for StaticSecretsProvider {
    fn secrets(&self) -> Result<Vec<Arc<dyn Secret>>> {
        Ok(self.secrets.clone())
    }
}

impl fmt::Debug for StaticSecretsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticSecretsProvider")
            .field("secrets", &self.secrets.len())
            .finish()
    }
}
