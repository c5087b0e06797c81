// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed registry for discovered secret definitions.
//!
//! Secret definitions read from a configuration section carry a `type`
//! discriminator. [`SecretRegistry`] maps each discriminator to a factory that
//! turns the remaining fields of a [`SecretDescriptor`] into a concrete
//! [`Secret`].

use crate::adapters::{StaticSecret, StoreSecret};
use crate::domain::{Result, SecretsError};
use crate::ports::{Secret, SecretFetcher};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The discriminator handled by [`SecretRegistry::with_store_secrets`].
pub const KIND_STORE: &str = "store";

/// The discriminator handled by [`SecretRegistry::with_static_secrets`].
pub const KIND_STATIC: &str = "static";

/// A secret definition as declared in a configuration section.
///
/// # Examples
///
/// The YAML shape of one definition:
///
/// ```yaml
/// type: store
/// key: Database.Password
/// secret_id: prod/db
/// secret_key: password
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SecretDescriptor {
    /// Discriminator naming the registered factory to use
    #[serde(rename = "type")]
    pub kind: String,
    /// The configuration key the secret maps to
    pub key: String,
    /// The identifier of the secret within a store, for store-backed kinds
    #[serde(default)]
    pub secret_id: Option<String>,
    /// Optional member name within a structured store payload
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Inline value, for fixed-value kinds
    #[serde(default)]
    pub value: Option<String>,
}

/// Factory producing a concrete secret from a descriptor.
pub type SecretFactory = Arc<dyn Fn(&SecretDescriptor) -> Result<Arc<dyn Secret>> + Send + Sync>;

/// Maps descriptor discriminators to secret factories.
///
/// The registry replaces reflection-style type lookup: the set of secret
/// variants a deployment understands is exactly the set of factories
/// registered here.
///
/// # Examples
///
/// ```
/// use secretcfg::adapters::MemoryFetcher;
/// use secretcfg::source::{SecretDescriptor, SecretRegistry};
/// use std::sync::Arc;
///
/// let registry = SecretRegistry::new().with_store_secrets(Arc::new(MemoryFetcher::new()));
///
/// let descriptor = SecretDescriptor {
///     kind: "store".to_string(),
///     key: "Api.Key".to_string(),
///     secret_id: Some("prod/api".to_string()),
///     secret_key: None,
///     value: None,
/// };
///
/// let secret = registry.resolve(&descriptor).unwrap();
/// assert_eq!(secret.configuration_key(), "Api.Key");
/// ```
#[derive(Default)]
pub struct SecretRegistry {
    factories: HashMap<String, SecretFactory>,
}

impl SecretRegistry {
    /// Creates a registry with no factories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory for the given discriminator, replacing any
    /// previous registration.
    ///
    /// # Examples
    ///
    /// ```
    /// use secretcfg::adapters::StaticSecret;
    /// use secretcfg::source::SecretRegistry;
    /// use std::sync::Arc;
    ///
    /// let mut registry = SecretRegistry::new();
    /// registry.register("reversed", |descriptor| {
    ///     let value: String = descriptor.value.clone().unwrap_or_default();
    ///     Ok(Arc::new(StaticSecret::new(
    ///         descriptor.key.clone(),
    ///         value.chars().rev().collect::<String>(),
    ///     )))
    /// });
    /// ```
    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&SecretDescriptor) -> Result<Arc<dyn Secret>> + Send + Sync + 'static,
    {
        self.factories.insert(kind.into(), Arc::new(factory));
        self
    }

    /// Registers the `"store"` factory, producing [`StoreSecret`]s backed by
    /// the given fetcher. Consumes and returns the registry for chaining.
    pub fn with_store_secrets(mut self, fetcher: Arc<dyn SecretFetcher>) -> Self {
        self.register(KIND_STORE, move |descriptor| {
            let secret_id =
                descriptor
                    .secret_id
                    .as_deref()
                    .ok_or_else(|| SecretsError::DiscoveryError {
                        message: format!(
                            "secret definition for key '{}' is missing 'secret_id'",
                            descriptor.key
                        ),
                        source: None,
                    })?;
            let mut secret =
                StoreSecret::new(descriptor.key.clone(), secret_id, Arc::clone(&fetcher));
            if let Some(secret_key) = &descriptor.secret_key {
                secret = secret.with_secret_key(secret_key.clone());
            }
            Ok(Arc::new(secret))
        });
        self
    }

    /// Registers the `"static"` factory, producing fixed-value secrets from
    /// the descriptor's inline `value`. Consumes and returns the registry for
    /// chaining.
    pub fn with_static_secrets(mut self) -> Self {
        self.register(KIND_STATIC, |descriptor| {
            let value = descriptor
                .value
                .as_deref()
                .ok_or_else(|| SecretsError::DiscoveryError {
                    message: format!(
                        "secret definition for key '{}' is missing 'value'",
                        descriptor.key
                    ),
                    source: None,
                })?;
            Ok(Arc::new(StaticSecret::new(descriptor.key.clone(), value)))
        });
        self
    }

    /// Returns whether a factory is registered for the given discriminator.
    pub fn contains_kind(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Resolves a descriptor into a concrete secret through its factory.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsError::UnknownSecretKind`] when no factory is
    /// registered for the descriptor's discriminator; factory errors
    /// propagate unchanged.
    pub fn resolve(&self, descriptor: &SecretDescriptor) -> Result<Arc<dyn Secret>> {
        let factory =
            self.factories
                .get(&descriptor.kind)
                .ok_or_else(|| SecretsError::UnknownSecretKind {
                    kind: descriptor.kind.clone(),
                })?;
        factory(descriptor)
    }
}

impl fmt::Debug for SecretRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.factories.keys().collect();
        kinds.sort();
        f.debug_struct("SecretRegistry").field("kinds", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryFetcher;
    use crate::domain::SecretPayload;

    fn descriptor(kind: &str) -> SecretDescriptor {
        SecretDescriptor {
            kind: kind.to_string(),
            key: "Api.Key".to_string(),
            secret_id: Some("prod/api".to_string()),
            secret_key: None,
            value: None,
        }
    }

    #[test]
    fn test_resolve_unknown_kind_fails() {
        let registry = SecretRegistry::new();
        let error = match registry.resolve(&descriptor("vault")) {
            Ok(_) => panic!("expected resolve to fail for unknown kind"),
            Err(e) => e,
        };
        assert!(matches!(error, SecretsError::UnknownSecretKind { .. }));
    }

    #[test]
    fn test_store_factory_builds_working_secret() {
        let fetcher = Arc::new(MemoryFetcher::new());
        fetcher.insert("prod/api", SecretPayload::from_string("sekrit"));

        let registry = SecretRegistry::new().with_store_secrets(fetcher);
        let secret = registry.resolve(&descriptor(KIND_STORE)).unwrap();

        assert_eq!(secret.configuration_key(), "Api.Key");
        assert_eq!(secret.get_value().unwrap(), "sekrit");
    }

    #[test]
    fn test_store_factory_requires_secret_id() {
        let registry = SecretRegistry::new().with_store_secrets(Arc::new(MemoryFetcher::new()));

        let mut incomplete = descriptor(KIND_STORE);
        incomplete.secret_id = None;

        let error = match registry.resolve(&incomplete) {
            Ok(_) => panic!("expected resolve to fail without secret_id"),
            Err(e) => e,
        };
        assert!(matches!(error, SecretsError::DiscoveryError { .. }));
    }

    #[test]
    fn test_store_factory_applies_secret_key() {
        let fetcher = Arc::new(MemoryFetcher::new());
        fetcher.insert("prod/api", SecretPayload::from_string(r#"{"token":"abc"}"#));

        let registry = SecretRegistry::new().with_store_secrets(fetcher);

        let mut with_sub_key = descriptor(KIND_STORE);
        with_sub_key.secret_key = Some("token".to_string());

        let secret = registry.resolve(&with_sub_key).unwrap();
        assert_eq!(secret.get_value().unwrap(), "abc");
    }

    #[test]
    fn test_static_factory_uses_inline_value() {
        let registry = SecretRegistry::new().with_static_secrets();

        let mut with_value = descriptor(KIND_STATIC);
        with_value.value = Some("inline".to_string());

        let secret = registry.resolve(&with_value).unwrap();
        assert_eq!(secret.get_value().unwrap(), "inline");
    }

    #[test]
    fn test_custom_factory() {
        let mut registry = SecretRegistry::new();
        registry.register("upper", |descriptor| {
            let value = descriptor.value.clone().unwrap_or_default();
            Ok(Arc::new(StaticSecret::new(
                descriptor.key.clone(),
                value.to_uppercase(),
            )))
        });

        let mut custom = descriptor("upper");
        custom.value = Some("abc".to_string());

        let secret = registry.resolve(&custom).unwrap();
        assert_eq!(secret.get_value().unwrap(), "ABC");
    }

    #[test]
    fn test_contains_kind() {
        let registry = SecretRegistry::new().with_static_secrets();
        assert!(registry.contains_kind(KIND_STATIC));
        assert!(!registry.contains_kind(KIND_STORE));
    }

    #[test]
    fn test_descriptor_deserializes_from_yaml() {
        let yaml = r#"
type: store
key: Database.Password
secret_id: prod/db
secret_key: password
"#;
        let descriptor: SecretDescriptor = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(descriptor.kind, "store");
        assert_eq!(descriptor.key, "Database.Password");
        assert_eq!(descriptor.secret_id.as_deref(), Some("prod/db"));
        assert_eq!(descriptor.secret_key.as_deref(), Some("password"));
        assert_eq!(descriptor.value, None);
    }
}
