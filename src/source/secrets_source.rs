// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarative description of a secrets-backed configuration layer.
//!
//! A [`SecretsConfigurationSource`] collects secrets and reload settings
//! before anything runs. Calling [`build`](SecretsConfigurationSource::build)
//! validates the collected state and produces the running
//! [`SecretsConfigurationProvider`].

use crate::domain::Result;
use crate::ports::{Secret, SecretsProvider};
use crate::source::builder::SecretsConfigurationBuilder;
use crate::source::context::BuildContext;
use crate::source::exception::SecretExceptionHook;
use crate::source::provider::SecretsConfigurationProvider;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "discovery")]
use crate::domain::SecretsError;
#[cfg(feature = "discovery")]
use crate::source::registry::SecretDescriptor;

/// How often a provider re-fetches its secrets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadInterval {
    /// Reload after the given delay, measured from the completion of the
    /// previous load.
    Every(Duration),
    /// Never reload. The timer is still armed as a live, disposable handle,
    /// but it never fires.
    Never,
}

impl ReloadInterval {
    /// The default reload interval: five minutes.
    pub const DEFAULT: ReloadInterval = ReloadInterval::Every(Duration::from_secs(300));

    /// Creates an interval from a duration in milliseconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use secretcfg::source::ReloadInterval;
    /// use std::time::Duration;
    ///
    /// assert_eq!(
    ///     ReloadInterval::from_millis(1500),
    ///     ReloadInterval::Every(Duration::from_millis(1500))
    /// );
    /// ```
    pub fn from_millis(millis: u64) -> Self {
        ReloadInterval::Every(Duration::from_millis(millis))
    }

    /// Returns whether periodic reloading is disabled.
    pub fn is_never(&self) -> bool {
        matches!(self, ReloadInterval::Never)
    }
}

impl Default for ReloadInterval {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A mutable, declarative description of a pending secrets provider.
///
/// The source accumulates secrets (registered directly, through the fluent
/// [`SecretsConfigurationBuilder`], or discovered once from a configuration
/// section) together with the reload interval and the exception hook. None of
/// it takes effect until [`build`](Self::build) constructs a validated
/// [`SecretsConfigurationProvider`].
///
/// # Examples
///
/// ```
/// use secretcfg::prelude::*;
/// use std::sync::Arc;
///
/// # fn main() -> secretcfg::domain::Result<()> {
/// let mut source = SecretsConfigurationSource::new();
/// source
///     .add_secret(Arc::new(StaticSecret::new("app.token", "sekrit")))
///     .set_reload_interval(ReloadInterval::from_millis(60_000));
///
/// let provider = source.build(&BuildContext::new())?;
/// # let _ = provider;
/// # Ok(())
/// # }
/// ```
pub struct SecretsConfigurationSource {
    name: String,
    secrets: Vec<Arc<dyn Secret>>,
    reload_interval: ReloadInterval,
    on_secret_exception: Option<SecretExceptionHook>,
    materialized: bool,
}

impl SecretsConfigurationSource {
    /// Creates an empty source named `"secrets"` with the default reload
    /// interval.
    pub fn new() -> Self {
        Self {
            name: "secrets".to_string(),
            secrets: Vec::new(),
            reload_interval: ReloadInterval::default(),
            on_secret_exception: None,
            materialized: false,
        }
    }

    /// Sets the source name used in logs and exception contexts.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the source name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a secret. Supports fluent chaining.
    pub fn add_secret(&mut self, secret: Arc<dyn Secret>) -> &mut Self {
        self.secrets.push(secret);
        self
    }

    /// Appends every secret of a provider, in the provider's order.
    ///
    /// # Errors
    ///
    /// Propagates the provider's enumeration error, leaving the source
    /// unchanged.
    pub fn add_provider(&mut self, provider: &dyn SecretsProvider) -> Result<&mut Self> {
        self.secrets.extend(provider.secrets()?);
        Ok(self)
    }

    /// Returns a fluent builder over this source.
    pub fn builder(&mut self) -> SecretsConfigurationBuilder<'_> {
        SecretsConfigurationBuilder::new(self)
    }

    /// Returns the secrets registered so far.
    pub fn secrets(&self) -> &[Arc<dyn Secret>] {
        &self.secrets
    }

    /// Returns the configured reload interval.
    pub fn reload_interval(&self) -> ReloadInterval {
        self.reload_interval
    }

    /// Sets the reload interval. Supports fluent chaining.
    pub fn set_reload_interval(&mut self, interval: ReloadInterval) -> &mut Self {
        self.reload_interval = interval;
        self
    }

    /// Disables periodic reloading entirely.
    ///
    /// Equivalent to `set_reload_interval(ReloadInterval::Never)`.
    pub fn disable_reload(&mut self) -> &mut Self {
        self.reload_interval = ReloadInterval::Never;
        self
    }

    /// Sets the hook invoked when a secret fails to fetch during a load.
    ///
    /// When unset, the hook registered on the [`BuildContext`] is inherited
    /// at build time.
    pub fn on_secret_exception(&mut self, hook: SecretExceptionHook) -> &mut Self {
        self.on_secret_exception = Some(hook);
        self
    }

    /// Returns whether one-time secret discovery has already run.
    pub fn is_materialized(&self) -> bool {
        self.materialized
    }

    /// Validates the collected state and constructs a running provider.
    ///
    /// On the first call, secret definitions declared in the context's
    /// configuration sections are discovered, resolved through the context's
    /// registry, and appended; later calls skip discovery entirely, so
    /// rebuilding a source is idempotent. A source without its own exception
    /// hook inherits the context's default hook.
    ///
    /// Validation of the secret list (non-empty, non-empty keys, unique keys)
    /// happens inside the provider's constructor, not here.
    ///
    /// # Errors
    ///
    /// Discovery errors ([`SecretsError::DiscoveryError`],
    /// [`SecretsError::UnknownSecretKind`]) and the provider's construction
    /// errors ([`SecretsError::NoSecrets`], [`SecretsError::EmptySecretKey`],
    /// [`SecretsError::DuplicateSecretKey`]).
    ///
    /// [`SecretsError::DiscoveryError`]: crate::domain::SecretsError::DiscoveryError
    /// [`SecretsError::UnknownSecretKind`]: crate::domain::SecretsError::UnknownSecretKind
    /// [`SecretsError::NoSecrets`]: crate::domain::SecretsError::NoSecrets
    /// [`SecretsError::EmptySecretKey`]: crate::domain::SecretsError::EmptySecretKey
    /// [`SecretsError::DuplicateSecretKey`]: crate::domain::SecretsError::DuplicateSecretKey
    pub fn build(&mut self, context: &BuildContext) -> Result<SecretsConfigurationProvider> {
        #[cfg(feature = "discovery")]
        if !self.materialized {
            self.materialize(context)?;
        }

        let hook = self
            .on_secret_exception
            .clone()
            .or_else(|| context.default_exception_hook().cloned());

        SecretsConfigurationProvider::new(
            self.name.clone(),
            self.secrets.clone(),
            self.reload_interval,
            hook,
        )
    }

    /// Reads secret definitions from the context's configuration sections and
    /// appends them. Runs at most once per source.
    #[cfg(feature = "discovery")]
    fn materialize(&mut self, context: &BuildContext) -> Result<()> {
        // Guard first: a failed discovery must not re-append on a retry.
        self.materialized = true;

        let Some((section, value)) = context.secrets_section() else {
            tracing::debug!("no secrets section in configuration for source '{}'", self.name);
            return Ok(());
        };

        let descriptors: Vec<SecretDescriptor> =
            serde_yaml::from_value(value.clone()).map_err(|e| SecretsError::DiscoveryError {
                message: format!(
                    "configuration section '{section}' is not a list of secret definitions"
                ),
                source: Some(Box::new(e)),
            })?;

        tracing::debug!(
            "discovered {} secret definitions in section '{}' for source '{}'",
            descriptors.len(),
            section,
            self.name
        );

        for descriptor in &descriptors {
            self.secrets.push(context.registry().resolve(descriptor)?);
        }

        Ok(())
    }
}

impl Default for SecretsConfigurationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretsConfigurationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretsConfigurationSource")
            .field("name", &self.name)
            .field("secrets", &self.secrets.len())
            .field("reload_interval", &self.reload_interval)
            .field("materialized", &self.materialized)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{StaticSecret, StaticSecretsProvider};

    #[test]
    fn test_new_source_defaults() {
        let source = SecretsConfigurationSource::new();
        assert_eq!(source.name(), "secrets");
        assert!(source.secrets().is_empty());
        assert_eq!(source.reload_interval(), ReloadInterval::DEFAULT);
        assert!(!source.is_materialized());
    }

    #[test]
    fn test_add_secret_chains() {
        let mut source = SecretsConfigurationSource::new();
        source
            .add_secret(Arc::new(StaticSecret::new("a", "1")))
            .add_secret(Arc::new(StaticSecret::new("b", "2")));
        assert_eq!(source.secrets().len(), 2);
    }

    #[test]
    fn test_add_provider_appends_in_order() {
        let provider = StaticSecretsProvider::new()
            .with_secret(Arc::new(StaticSecret::new("a", "1")))
            .with_secret(Arc::new(StaticSecret::new("b", "2")));

        let mut source = SecretsConfigurationSource::new();
        source.add_provider(&provider).unwrap();

        let keys: Vec<_> = source
            .secrets()
            .iter()
            .map(|s| s.configuration_key().to_string())
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_disable_reload_sets_never() {
        let mut source = SecretsConfigurationSource::new();
        source.set_reload_interval(ReloadInterval::from_millis(1000));
        source.disable_reload();
        assert_eq!(source.reload_interval(), ReloadInterval::Never);
        assert!(source.reload_interval().is_never());
    }

    #[test]
    fn test_with_name() {
        let source = SecretsConfigurationSource::new().with_name("vault");
        assert_eq!(source.name(), "vault");
    }

    #[test]
    fn test_reload_interval_from_millis() {
        assert_eq!(
            ReloadInterval::from_millis(250),
            ReloadInterval::Every(Duration::from_millis(250))
        );
    }

    #[test]
    fn test_reload_interval_default_is_five_minutes() {
        assert_eq!(
            ReloadInterval::default(),
            ReloadInterval::Every(Duration::from_secs(300))
        );
    }

    #[test]
    fn test_build_empty_source_fails() {
        let mut source = SecretsConfigurationSource::new();
        assert!(source.build(&BuildContext::new()).is_err());
    }

    #[test]
    fn test_build_marks_materialized() {
        let mut source = SecretsConfigurationSource::new();
        source.add_secret(Arc::new(StaticSecret::new("a", "1")));
        source.disable_reload();

        let _provider = source.build(&BuildContext::new()).unwrap();

        #[cfg(feature = "discovery")]
        assert!(source.is_materialized());
    }
}
