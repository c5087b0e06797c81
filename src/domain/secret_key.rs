// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration key newtype for case-insensitive key handling.
//!
//! This module provides the `SecretKey` type, a newtype wrapper around `String`
//! whose equality and hashing ignore ASCII case. The original spelling of the
//! key is preserved for display and enumeration.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A configuration key with case-insensitive identity.
///
/// `SecretKey` wraps a `String` and compares, hashes, and sorts without regard
/// to ASCII case, so a map keyed by `SecretKey` resolves `"Foo"`, `"foo"`, and
/// `"FOO"` to the same entry. The spelling used at construction time is kept
/// and returned by [`SecretKey::as_str`].
///
/// # Examples
///
/// ```
/// use secretcfg::domain::secret_key::SecretKey;
///
/// let key = SecretKey::from("Database.Password");
///
/// assert_eq!(key, SecretKey::from("database.password"));
/// assert_eq!(key.as_str(), "Database.Password");
/// ```
#[derive(Clone, Debug)]
pub struct SecretKey(String);

impl SecretKey {
    /// Creates a new `SecretKey` from a `String`.
    ///
    /// # Examples
    ///
    /// ```
    /// use secretcfg::domain::secret_key::SecretKey;
    ///
    /// let key = SecretKey::new("app.name".to_string());
    /// assert_eq!(key.as_str(), "app.name");
    /// ```
    pub fn new(key: String) -> Self {
        SecretKey(key)
    }

    /// Returns the key as a string slice, in its original spelling.
    ///
    /// # Examples
    ///
    /// ```
    /// use secretcfg::domain::secret_key::SecretKey;
    ///
    /// let key = SecretKey::from("App.Version");
    /// assert_eq!(key.as_str(), "App.Version");
    /// ```
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `SecretKey` into its inner `String`.
    ///
    /// # Examples
    ///
    /// ```
    /// use secretcfg::domain::secret_key::SecretKey;
    ///
    /// let key = SecretKey::from("app.debug");
    /// let inner = key.into_string();
    /// assert_eq!(inner, "app.debug");
    /// ```
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for SecretKey {
    fn from(s: String) -> Self {
        SecretKey(s)
    }
}

impl From<&str> for SecretKey {
    fn from(s: &str) -> Self {
        SecretKey(s.to_string())
    }
}

impl From<SecretKey> for String {
    fn from(key: SecretKey) -> Self {
        key.0
    }
}

impl AsRef<str> for SecretKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for SecretKey {}

// Hash must agree with the case-insensitive Eq.
impl Hash for SecretKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            byte.to_ascii_lowercase().hash(state);
        }
    }
}
