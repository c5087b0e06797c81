// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fluent builder for registering secrets into a source.
//!
//! This module provides [`SecretsConfigurationBuilder`], a thin fluent facade
//! over a mutable [`SecretsConfigurationSource`]. It exists so call sites that
//! register many secrets can chain by value instead of threading `&mut`
//! receivers.

use crate::domain::Result;
use crate::ports::{Secret, SecretsProvider};
use crate::source::secrets_source::SecretsConfigurationSource;
use std::sync::Arc;

/// A builder that adds secrets to a secrets source.
///
/// # Examples
///
/// ```
/// use secretcfg::prelude::*;
/// use std::sync::Arc;
///
/// let mut source = SecretsConfigurationSource::new();
/// source
///     .builder()
///     .add_secret(Arc::new(StaticSecret::new("a", "1")))
///     .add_secret(Arc::new(StaticSecret::new("b", "2")));
///
/// assert_eq!(source.secrets().len(), 2);
/// ```
#[derive(Debug)]
pub struct SecretsConfigurationBuilder<'a> {
    source: &'a mut SecretsConfigurationSource,
}

impl<'a> SecretsConfigurationBuilder<'a> {
    /// Creates a builder over the given source.
    pub fn new(source: &'a mut SecretsConfigurationSource) -> Self {
        Self { source }
    }

    /// Adds a secret to the backing source.
    pub fn add_secret(self, secret: Arc<dyn Secret>) -> Self {
        self.source.add_secret(secret);
        self
    }

    /// Adds every secret of a provider to the backing source.
    ///
    /// # Errors
    ///
    /// Propagates the provider's enumeration error.
    pub fn add_provider(self, provider: &dyn SecretsProvider) -> Result<Self> {
        self.source.add_provider(provider)?;
        Ok(self)
    }

    /// Returns the source backing the builder.
    pub fn source(&self) -> &SecretsConfigurationSource {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{StaticSecret, StaticSecretsProvider};

    #[test]
    fn test_builder_add_secret() {
        let mut source = SecretsConfigurationSource::new();
        source
            .builder()
            .add_secret(Arc::new(StaticSecret::new("a", "1")));
        assert_eq!(source.secrets().len(), 1);
    }

    #[test]
    fn test_builder_add_provider() {
        let provider =
            StaticSecretsProvider::new().with_secret(Arc::new(StaticSecret::new("a", "1")));

        let mut source = SecretsConfigurationSource::new();
        source.builder().add_provider(&provider).unwrap();

        assert_eq!(source.secrets().len(), 1);
    }

    #[test]
    fn test_builder_chains() {
        let mut source = SecretsConfigurationSource::new();
        let builder = source
            .builder()
            .add_secret(Arc::new(StaticSecret::new("a", "1")))
            .add_secret(Arc::new(StaticSecret::new("b", "2")));

        assert_eq!(builder.source().secrets().len(), 2);
    }
}
