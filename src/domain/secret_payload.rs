// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw secret payloads as returned by a secret store.
//!
//! A store may hold a secret as text or as raw bytes. `SecretPayload` carries
//! both forms and knows how to collapse either into the string representation
//! used by the configuration layer.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::fmt;

/// The raw result of fetching a secret from a secret store.
///
/// At most one of the two forms is normally populated. When converting to a
/// configuration value, the text form wins and a binary payload is rendered
/// as its base64 encoding.
///
/// The `Debug` implementation never prints the payload contents.
///
/// # Examples
///
/// ```
/// use secretcfg::domain::secret_payload::SecretPayload;
///
/// let payload = SecretPayload::from_string("hunter2");
/// assert_eq!(payload.into_config_string(), Some("hunter2".to_string()));
///
/// let payload = SecretPayload::from_binary(vec![0xDE, 0xAD]);
/// assert_eq!(payload.into_config_string(), Some("3q0=".to_string()));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SecretPayload {
    string_value: Option<String>,
    binary_value: Option<Vec<u8>>,
}

impl SecretPayload {
    /// Creates a payload holding a text secret.
    pub fn from_string(value: impl Into<String>) -> Self {
        SecretPayload {
            string_value: Some(value.into()),
            binary_value: None,
        }
    }

    /// Creates a payload holding a binary secret.
    pub fn from_binary(value: impl Into<Vec<u8>>) -> Self {
        SecretPayload {
            string_value: None,
            binary_value: Some(value.into()),
        }
    }

    /// Creates a payload holding nothing.
    ///
    /// Fetching a secret that resolves to an empty payload is treated as
    /// "not found" by the store-backed secret adapter.
    pub fn empty() -> Self {
        SecretPayload {
            string_value: None,
            binary_value: None,
        }
    }

    /// Returns the text form of the payload, if present.
    pub fn string_value(&self) -> Option<&str> {
        self.string_value.as_deref()
    }

    /// Returns the binary form of the payload, if present.
    pub fn binary_value(&self) -> Option<&[u8]> {
        self.binary_value.as_deref()
    }

    /// Collapses the payload into the string used as a configuration value.
    ///
    /// The text form is returned as-is; a binary payload is base64-encoded.
    /// Returns `None` when the payload holds neither form.
    pub fn into_config_string(self) -> Option<String> {
        if let Some(text) = self.string_value {
            return Some(text);
        }
        self.binary_value.map(|bytes| BASE64.encode(bytes))
    }
}

impl From<String> for SecretPayload {
    fn from(value: String) -> Self {
        SecretPayload::from_string(value)
    }
}

impl From<&str> for SecretPayload {
    fn from(value: &str) -> Self {
        SecretPayload::from_string(value)
    }
}

impl fmt::Debug for SecretPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretPayload")
            .field("string_value", &self.string_value.as_ref().map(|_| "<redacted>"))
            .field("binary_value", &self.binary_value.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
