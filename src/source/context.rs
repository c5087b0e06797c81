// SPDX-License-Identifier: MIT OR Apache-2.0

//! Build context handed to a source by the owning configuration hierarchy.
//!
//! A [`BuildContext`] is the seam between this crate and the layered
//! configuration mechanism that composes it with other sources. It carries a
//! pre-resolved view of the *other* sources' configuration sections (so secret
//! definitions declared in configuration can be discovered without the source
//! consulting itself), the secret registry used to resolve those definitions,
//! and a process-wide default exception hook.
//!
//! Resolution is two-phase by construction: the hierarchy first resolves every
//! source except the secrets source into the section view, then hands that
//! view here. The secrets source can therefore never recurse into itself while
//! discovering its own definitions.

use crate::source::exception::SecretExceptionHook;

#[cfg(feature = "discovery")]
use crate::source::registry::SecretRegistry;
#[cfg(feature = "discovery")]
use std::collections::HashMap;

/// The configuration section holding secret definitions.
#[cfg(feature = "discovery")]
pub const SECRETS_SECTION: &str = "secretcfg.secrets";

/// Alias section name for environments that cannot express dotted keys.
#[cfg(feature = "discovery")]
pub const SECRETS_SECTION_ALIAS: &str = "secretcfg_secrets";

/// Ambient state a source needs when it is built.
///
/// # Examples
///
/// ```
/// use secretcfg::source::BuildContext;
/// use std::sync::Arc;
///
/// let context = BuildContext::new()
///     .with_default_exception_hook(Arc::new(|ctx| {
///         eprintln!("secret '{}' failed", ctx.secret().configuration_key());
///     }));
/// # let _ = context;
/// ```
#[derive(Default)]
pub struct BuildContext {
    #[cfg(feature = "discovery")]
    sections: HashMap<String, serde_yaml::Value>,
    #[cfg(feature = "discovery")]
    registry: SecretRegistry,
    default_exception_hook: Option<SecretExceptionHook>,
}

impl BuildContext {
    /// Creates an empty context: no sections, no factories, no default hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default exception hook inherited by sources that do not
    /// register their own.
    pub fn with_default_exception_hook(mut self, hook: SecretExceptionHook) -> Self {
        self.default_exception_hook = Some(hook);
        self
    }

    /// Returns the default exception hook, if one was set.
    pub fn default_exception_hook(&self) -> Option<&SecretExceptionHook> {
        self.default_exception_hook.as_ref()
    }

    /// Adds a named configuration section to the pre-resolved view.
    #[cfg(feature = "discovery")]
    pub fn with_section(mut self, name: impl Into<String>, value: serde_yaml::Value) -> Self {
        self.sections.insert(name.into(), value);
        self
    }

    /// Returns a named configuration section, if present.
    #[cfg(feature = "discovery")]
    pub fn section(&self, name: &str) -> Option<&serde_yaml::Value> {
        self.sections.get(name)
    }

    /// Replaces the secret registry.
    #[cfg(feature = "discovery")]
    pub fn with_registry(mut self, registry: SecretRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Returns the secret registry.
    #[cfg(feature = "discovery")]
    pub fn registry(&self) -> &SecretRegistry {
        &self.registry
    }

    /// Returns the secret registry for mutation.
    #[cfg(feature = "discovery")]
    pub fn registry_mut(&mut self) -> &mut SecretRegistry {
        &mut self.registry
    }

    /// Returns the secrets section under its primary or alias name, first
    /// match wins.
    #[cfg(feature = "discovery")]
    pub(crate) fn secrets_section(&self) -> Option<(&'static str, &serde_yaml::Value)> {
        if let Some(value) = self.sections.get(SECRETS_SECTION) {
            return Some((SECRETS_SECTION, value));
        }
        self.sections
            .get(SECRETS_SECTION_ALIAS)
            .map(|value| (SECRETS_SECTION_ALIAS, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_new_context_is_empty() {
        let context = BuildContext::new();
        assert!(context.default_exception_hook().is_none());
    }

    #[test]
    fn test_default_exception_hook_round_trip() {
        let context =
            BuildContext::new().with_default_exception_hook(Arc::new(|_context| {}));
        assert!(context.default_exception_hook().is_some());
    }

    #[cfg(feature = "discovery")]
    #[test]
    fn test_section_round_trip() {
        let value: serde_yaml::Value = serde_yaml::from_str("- a\n- b").unwrap();
        let context = BuildContext::new().with_section("custom.section", value);

        assert!(context.section("custom.section").is_some());
        assert!(context.section("missing").is_none());
    }

    #[cfg(feature = "discovery")]
    #[test]
    fn test_secrets_section_prefers_primary_name() {
        let primary: serde_yaml::Value = serde_yaml::from_str("primary").unwrap();
        let alias: serde_yaml::Value = serde_yaml::from_str("alias").unwrap();

        let context = BuildContext::new()
            .with_section(SECRETS_SECTION, primary)
            .with_section(SECRETS_SECTION_ALIAS, alias);

        let (name, value) = context.secrets_section().unwrap();
        assert_eq!(name, SECRETS_SECTION);
        assert_eq!(value.as_str(), Some("primary"));
    }

    #[cfg(feature = "discovery")]
    #[test]
    fn test_secrets_section_falls_back_to_alias() {
        let alias: serde_yaml::Value = serde_yaml::from_str("alias").unwrap();
        let context = BuildContext::new().with_section(SECRETS_SECTION_ALIAS, alias);

        let (name, _) = context.secrets_section().unwrap();
        assert_eq!(name, SECRETS_SECTION_ALIAS);
    }

    #[cfg(feature = "discovery")]
    #[test]
    fn test_secrets_section_absent() {
        let context = BuildContext::new();
        assert!(context.secrets_section().is_none());
    }
}
