// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory secret store client.
//!
//! This module provides [`MemoryFetcher`], a [`SecretFetcher`] backed by a
//! map. It exists for tests and examples, and as the reference implementation
//! of the fetcher port: entries can be changed at runtime to exercise the
//! reload path.

use crate::domain::SecretPayload;
use crate::ports::{FetchError, SecretFetcher};
use std::collections::HashMap;
use std::sync::RwLock;

/// An in-memory secret store.
///
/// Entries can be inserted and replaced while the fetcher is shared, which
/// makes it straightforward to simulate a secret rotating between reloads.
///
/// # Examples
///
/// ```
/// use secretcfg::adapters::MemoryFetcher;
/// use secretcfg::domain::SecretPayload;
/// use secretcfg::ports::SecretFetcher;
///
/// let fetcher = MemoryFetcher::new();
/// fetcher.insert("prod/token", SecretPayload::from_string("v1"));
///
/// assert_eq!(fetcher.fetch("prod/token").unwrap().string_value(), Some("v1"));
///
/// fetcher.insert("prod/token", SecretPayload::from_string("v2"));
/// assert_eq!(fetcher.fetch("prod/token").unwrap().string_value(), Some("v2"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    values: RwLock<HashMap<String, SecretPayload>>,
}

impl MemoryFetcher {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with text secrets.
    ///
    /// # Examples
    ///
    /// ```
    /// use secretcfg::adapters::MemoryFetcher;
    /// use secretcfg::ports::SecretFetcher;
    /// use std::collections::HashMap;
    ///
    /// let mut values = HashMap::new();
    /// values.insert("prod/token".to_string(), "sekrit".to_string());
    ///
    /// let fetcher = MemoryFetcher::with_values(values);
    /// assert!(fetcher.fetch("prod/token").is_ok());
    /// ```
    pub fn with_values(values: HashMap<String, String>) -> Self {
        let values = values
            .into_iter()
            .map(|(id, text)| (id, SecretPayload::from_string(text)))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }

    /// Inserts or replaces the payload stored under `secret_id`.
    pub fn insert(&self, secret_id: impl Into<String>, payload: SecretPayload) {
        if let Ok(mut values) = self.values.write() {
            values.insert(secret_id.into(), payload);
        }
    }

    /// Removes the payload stored under `secret_id`, so later fetches fail.
    pub fn remove(&self, secret_id: &str) {
        if let Ok(mut values) = self.values.write() {
            values.remove(secret_id);
        }
    }
}

impl SecretFetcher for MemoryFetcher {
    fn fetch(&self, secret_id: &str) -> Result<SecretPayload, FetchError> {
        let values = self
            .values
            .read()
            .map_err(|_| -> FetchError { "memory store lock poisoned".into() })?;
        values
            .get(secret_id)
            .cloned()
            .ok_or_else(|| format!("no secret with id '{secret_id}'").into())
    }
}
