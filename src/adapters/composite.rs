// SPDX-License-Identifier: MIT OR Apache-2.0

//! Composite secrets provider.
//!
//! This module provides [`CompositeSecretsProvider`], which flattens several
//! child providers into one ordered secret list.

use crate::domain::Result;
use crate::ports::{Secret, SecretsProvider};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// A provider that aggregates the secrets of several child providers.
///
/// Secrets are ordered first-provider-first. The flattened list is computed
/// on the first successful enumeration and cached; later calls return the
/// cached list without consulting the children again. Duplicate keys are not
/// de-duplicated at this layer — the configuration provider rejects them when
/// the source is built.
///
/// A child provider that fails while enumerating propagates immediately, and
/// nothing is cached for that attempt.
///
/// # Examples
///
/// ```
/// use secretcfg::adapters::{CompositeSecretsProvider, StaticSecret, StaticSecretsProvider};
/// use secretcfg::ports::SecretsProvider;
/// use std::sync::Arc;
///
/// let first = StaticSecretsProvider::new()
///     .with_secret(Arc::new(StaticSecret::new("a", "1")));
/// let second = StaticSecretsProvider::new()
///     .with_secret(Arc::new(StaticSecret::new("b", "2")));
///
/// let composite = CompositeSecretsProvider::new(vec![Arc::new(first), Arc::new(second)]);
///
/// let secrets = composite.secrets().unwrap();
/// assert_eq!(secrets[0].configuration_key(), "a");
/// assert_eq!(secrets[1].configuration_key(), "b");
/// ```
pub struct CompositeSecretsProvider {
    providers: Vec<Arc<dyn SecretsProvider>>,
    flattened: OnceCell<Vec<Arc<dyn Secret>>>,
}

impl CompositeSecretsProvider {
    /// Creates a composite over the given child providers.
    pub fn new(providers: Vec<Arc<dyn SecretsProvider>>) -> Self {
        Self {
            providers,
            flattened: OnceCell::new(),
        }
    }
}

impl SecretsProvider for CompositeSecretsProvider {
    fn secrets(&self) -> Result<Vec<Arc<dyn Secret>>> {
        let flattened = self.flattened.get_or_try_init(|| {
            let mut all = Vec::new();
            for provider in &self.providers {
                all.extend(provider.secrets()?);
            }
            Ok(all)
        })?;
        Ok(flattened.clone())
    }
}
