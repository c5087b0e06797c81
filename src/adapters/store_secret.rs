// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store-backed secret implementation.
//!
//! This module provides [`StoreSecret`], a [`Secret`] whose value is fetched
//! from a secret store through a [`SecretFetcher`], with optional narrowing of
//! a structured (JSON object) payload down to a single member.

use crate::domain::{Result, SecretsError};
use crate::ports::{Secret, SecretFetcher};
use std::fmt;
use std::sync::Arc;

/// A secret fetched from a secret store.
///
/// The store is addressed by a `secret_id`. When the store returns a text
/// payload and a `secret_key` is configured, the text is parsed as a JSON
/// object and the named member becomes the value; without a `secret_key` the
/// text is used as-is. Binary payloads are exposed as their base64 encoding
/// (a configured `secret_key` does not apply to binary payloads).
///
/// No retries happen at this layer; retry and backoff, if any, belong to the
/// fetch capability.
///
/// # Examples
///
/// ```rust
/// use secretcfg::adapters::{MemoryFetcher, StoreSecret};
/// use secretcfg::domain::SecretPayload;
/// use secretcfg::ports::Secret;
/// use std::sync::Arc;
///
/// let fetcher = Arc::new(MemoryFetcher::new());
/// fetcher.insert("prod/db", SecretPayload::from_string(r#"{"password":"hunter2"}"#));
///
/// let secret = StoreSecret::new("Database.Password", "prod/db", fetcher)
///     .with_secret_key("password");
///
/// assert_eq!(secret.get_value().unwrap(), "hunter2");
/// ```
pub struct StoreSecret {
    /// The configuration key the value is exposed under
    configuration_key: String,
    /// The identifier of the secret within the store
    secret_id: String,
    /// Optional member name within a JSON object payload
    secret_key: Option<String>,
    /// The store client
    fetcher: Arc<dyn SecretFetcher>,
}

impl StoreSecret {
    /// Creates a new store-backed secret for a plain (unstructured) value.
    ///
    /// # Arguments
    ///
    /// * `configuration_key` - The configuration key to expose the value under
    /// * `secret_id` - The identifier of the secret within the store
    /// * `fetcher` - The store client used to fetch the payload
    pub fn new(
        configuration_key: impl Into<String>,
        secret_id: impl Into<String>,
        fetcher: Arc<dyn SecretFetcher>,
    ) -> Self {
        Self {
            configuration_key: configuration_key.into(),
            secret_id: secret_id.into(),
            secret_key: None,
            fetcher,
        }
    }

    /// Narrows a structured (JSON object) payload down to one named member.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use secretcfg::adapters::{MemoryFetcher, StoreSecret};
    /// use std::sync::Arc;
    ///
    /// let fetcher = Arc::new(MemoryFetcher::new());
    /// let secret = StoreSecret::new("Database.Password", "prod/db", fetcher)
    ///     .with_secret_key("password");
    ///
    /// assert_eq!(secret.secret_key(), Some("password"));
    /// ```
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Returns the identifier of the secret within the store.
    pub fn secret_id(&self) -> &str {
        &self.secret_id
    }

    /// Returns the configured member name within a structured payload, if any.
    pub fn secret_key(&self) -> Option<&str> {
        self.secret_key.as_deref()
    }

    fn not_found(&self) -> SecretsError {
        SecretsError::SecretNotFound {
            secret_id: self.secret_id.clone(),
            secret_key: self.secret_key.clone(),
            configuration_key: self.configuration_key.clone(),
        }
    }
}

impl Secret for StoreSecret {
    fn configuration_key(&self) -> &str {
        &self.configuration_key
    }

    fn get_value(&self) -> Result<String> {
        let payload =
            self.fetcher
                .fetch(&self.secret_id)
                .map_err(|e| SecretsError::FetchFailed {
                    configuration_key: self.configuration_key.clone(),
                    source: e,
                })?;

        if let (Some(member), Some(text)) = (self.secret_key.as_deref(), payload.string_value()) {
            return match json_field(text, member)? {
                Some(value) => Ok(value),
                None => Err(self.not_found()),
            };
        }

        payload.into_config_string().ok_or_else(|| self.not_found())
    }
}

impl fmt::Debug for StoreSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreSecret")
            .field("configuration_key", &self.configuration_key)
            .field("secret_id", &self.secret_id)
            .field("secret_key", &self.secret_key)
            .finish()
    }
}

/// Extracts one member of a JSON object, rendered as a configuration string.
///
/// String members are returned without JSON quoting; other scalar members are
/// rendered in their JSON form. A member that is absent or JSON `null` yields
/// `Ok(None)`.
///
/// This is a pure utility with no connection to any store; [`StoreSecret`]
/// uses it to narrow structured payloads.
///
/// # Errors
///
/// Returns [`SecretsError::ParseError`] when `text` is not a JSON object.
///
/// # Examples
///
/// ```
/// use secretcfg::adapters::json_field;
///
/// let blob = r#"{"user":"app","port":5432}"#;
/// assert_eq!(json_field(blob, "user").unwrap(), Some("app".to_string()));
/// assert_eq!(json_field(blob, "port").unwrap(), Some("5432".to_string()));
/// assert_eq!(json_field(blob, "missing").unwrap(), None);
/// ```
pub fn json_field(text: &str, member: &str) -> Result<Option<String>> {
    let root: serde_json::Value =
        serde_json::from_str(text).map_err(|e| SecretsError::ParseError {
            message: "secret value is not a JSON object".to_string(),
            source: Some(Box::new(e)),
        })?;

    if !root.is_object() {
        return Err(SecretsError::ParseError {
            message: "secret value is not a JSON object".to_string(),
            source: None,
        });
    }

    Ok(root.get(member).and_then(|value| match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SecretPayload;
    use crate::ports::FetchError;

    struct FixedFetcher {
        payload: SecretPayload,
    }

    impl SecretFetcher for FixedFetcher {
        fn fetch(&self, _secret_id: &str) -> std::result::Result<SecretPayload, FetchError> {
            Ok(self.payload.clone())
        }
    }

    struct FailingFetcher;

    impl SecretFetcher for FailingFetcher {
        fn fetch(&self, _secret_id: &str) -> std::result::Result<SecretPayload, FetchError> {
            Err("store unavailable".into())
        }
    }

    fn secret_with(payload: SecretPayload) -> StoreSecret {
        StoreSecret::new("app.value", "prod/app", Arc::new(FixedFetcher { payload }))
    }

    #[test]
    fn test_plain_string_value() {
        let secret = secret_with(SecretPayload::from_string("plain"));
        assert_eq!(secret.get_value().unwrap(), "plain");
    }

    #[test]
    fn test_json_sub_key_value() {
        let secret = secret_with(SecretPayload::from_string(r#"{"password":"hunter2"}"#))
            .with_secret_key("password");
        assert_eq!(secret.get_value().unwrap(), "hunter2");
    }

    #[test]
    fn test_json_sub_key_renders_scalars() {
        let secret =
            secret_with(SecretPayload::from_string(r#"{"port":5432}"#)).with_secret_key("port");
        assert_eq!(secret.get_value().unwrap(), "5432");
    }

    #[test]
    fn test_missing_sub_key_is_not_found() {
        let secret =
            secret_with(SecretPayload::from_string(r#"{"user":"app"}"#)).with_secret_key("password");
        let error = secret.get_value().unwrap_err();
        assert!(matches!(error, SecretsError::SecretNotFound { .. }));
        assert!(error.to_string().contains("prod/app"));
        assert!(error.to_string().contains("password"));
        assert!(error.to_string().contains("app.value"));
    }

    #[test]
    fn test_non_json_payload_with_sub_key_is_parse_error() {
        let secret =
            secret_with(SecretPayload::from_string("not json")).with_secret_key("password");
        assert!(matches!(
            secret.get_value().unwrap_err(),
            SecretsError::ParseError { .. }
        ));
    }

    #[test]
    fn test_binary_payload_is_base64() {
        let secret = secret_with(SecretPayload::from_binary(b"hello".to_vec()));
        assert_eq!(secret.get_value().unwrap(), "aGVsbG8=");
    }

    #[test]
    fn test_binary_payload_ignores_sub_key() {
        let secret =
            secret_with(SecretPayload::from_binary(b"hello".to_vec())).with_secret_key("password");
        assert_eq!(secret.get_value().unwrap(), "aGVsbG8=");
    }

    #[test]
    fn test_empty_payload_is_not_found() {
        let secret = secret_with(SecretPayload::empty());
        assert!(matches!(
            secret.get_value().unwrap_err(),
            SecretsError::SecretNotFound { .. }
        ));
    }

    #[test]
    fn test_fetcher_error_is_wrapped() {
        let secret = StoreSecret::new("app.value", "prod/app", Arc::new(FailingFetcher));
        let error = secret.get_value().unwrap_err();
        assert!(matches!(error, SecretsError::FetchFailed { .. }));
        assert!(error.to_string().contains("app.value"));
    }

    #[test]
    fn test_json_field_null_member_is_none() {
        assert_eq!(json_field(r#"{"a":null}"#, "a").unwrap(), None);
    }

    #[test]
    fn test_json_field_rejects_non_object() {
        assert!(json_field(r#"["a","b"]"#, "a").is_err());
    }

    #[test]
    fn test_debug_omits_fetcher() {
        let secret = secret_with(SecretPayload::from_string("plain"));
        let rendered = format!("{:?}", secret);
        assert!(rendered.contains("app.value"));
        assert!(rendered.contains("prod/app"));
    }
}
