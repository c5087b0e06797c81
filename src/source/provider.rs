// SPDX-License-Identifier: MIT OR Apache-2.0

//! The running secrets configuration provider.
//!
//! This module provides [`SecretsConfigurationProvider`], the validated,
//! stateful instance built from a [`SecretsConfigurationSource`]. It owns the
//! key/value cache, the reload timer, and the diffing logic that decides when
//! the owning configuration hierarchy must re-bind.
//!
//! [`SecretsConfigurationSource`]: crate::source::SecretsConfigurationSource

use crate::domain::{Result, SecretKey, SecretsError};
use crate::ports::Secret;
use crate::source::exception::{ReloadCallback, SecretExceptionContext, SecretExceptionHook};
use crate::source::secrets_source::ReloadInterval;
use std::collections::{HashMap, HashSet};
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, RwLock};
use std::thread::{self, JoinHandle};

/// A configuration provider backed by a secret store.
///
/// The provider is built from a source and moves through three states:
/// constructed (validated, cache empty), loaded (cache populated, reload
/// timer armed), and stopped (timer cancelled). The first call to
/// [`load`](Self::load) performs the initial synchronous fetch and arms the
/// timer; every timer tick re-runs the same load.
///
/// Each load fetches every secret in order. A secret that fails is reported
/// to the exception hook and its key keeps its last known value (or maps to
/// `None` if it never succeeded) — one bad secret never aborts the batch.
/// When a load changes any cached value, the registered reload callback
/// fires so downstream configuration bindings can be recomputed. The first
/// load never fires it.
///
/// Lookups are ASCII case-insensitive; the spelling of keys is preserved.
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
///     .add_secret(Arc::new(StaticSecret::new("foo", "abc")))
///     .add_secret(Arc::new(StaticSecret::new("bar", "123")));
/// source.disable_reload();
///
/// let mut provider = source.build(&BuildContext::new())?;
/// provider.load();
///
/// assert_eq!(provider.try_get("foo"), Some(Some("abc".to_string())));
/// assert_eq!(provider.try_get("BAR"), Some(Some("123".to_string())));
/// assert_eq!(provider.try_get("baz"), None);
/// # Ok(())
/// # }
/// ```
pub struct SecretsConfigurationProvider {
    core: Arc<ProviderCore>,
    reload_interval: ReloadInterval,
    /// Stop signal sender for the timer thread
    stop_tx: Option<Sender<()>>,
    /// Timer thread handle
    timer_thread: Option<JoinHandle<()>>,
}

/// State shared between the provider handle and the timer thread.
struct ProviderCore {
    name: String,
    /// Immutable snapshot of the source's secrets at build time
    secrets: Vec<Arc<dyn Secret>>,
    /// The cache: configuration key to current value, `None` when the secret
    /// has never fetched successfully
    data: RwLock<HashMap<SecretKey, Option<String>>>,
    /// Serializes loads so an explicit call cannot interleave with a tick
    load_guard: Mutex<()>,
    on_secret_exception: Option<SecretExceptionHook>,
    on_reload: RwLock<Option<ReloadCallback>>,
}

impl SecretsConfigurationProvider {
    /// Validates the snapshot and constructs a provider in the initial state.
    ///
    /// Fails fast: no partial provider is ever returned.
    pub(crate) fn new(
        name: String,
        secrets: Vec<Arc<dyn Secret>>,
        reload_interval: ReloadInterval,
        on_secret_exception: Option<SecretExceptionHook>,
    ) -> Result<Self> {
        if secrets.is_empty() {
            return Err(SecretsError::NoSecrets { source_name: name });
        }

        let mut seen = HashSet::with_capacity(secrets.len());
        for (index, secret) in secrets.iter().enumerate() {
            let key = secret.configuration_key();
            if key.is_empty() {
                return Err(SecretsError::EmptySecretKey { index });
            }
            if !seen.insert(key.to_ascii_lowercase()) {
                return Err(SecretsError::DuplicateSecretKey {
                    key: key.to_string(),
                });
            }
        }

        Ok(Self {
            core: Arc::new(ProviderCore {
                name,
                secrets,
                data: RwLock::new(HashMap::new()),
                load_guard: Mutex::new(()),
                on_secret_exception,
                on_reload: RwLock::new(None),
            }),
            reload_interval,
            stop_tx: None,
            timer_thread: None,
        })
    }

    /// Returns the provider name.
    pub fn name(&self) -> &str {
        &self.core.name
    }

    /// Registers the callback invoked when a load changed any cached value.
    ///
    /// Replaces any previously registered callback.
    pub fn on_reload(&self, callback: ReloadCallback) {
        let mut slot = match self.core.on_reload.write() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = Some(callback);
    }

    /// Fetches all secrets, updates the cache, and arms the reload timer.
    ///
    /// The first call populates the cache (failed secrets are stored as
    /// `None`) and arms the timer; later calls diff fetched values against
    /// the cache and fire the reload callback when anything changed.
    ///
    /// A panicking exception hook aborts the current load and propagates
    /// from this call — but only after the timer has been armed, so periodic
    /// reloading survives. Timer-driven loads log such failures instead of
    /// propagating them.
    pub fn load(&mut self) {
        let outcome = catch_unwind(AssertUnwindSafe(|| self.core.load_once()));
        self.arm_timer();
        if let Err(panic) = outcome {
            resume_unwind(panic);
        }
    }

    /// Looks up the current value for a key, ASCII case-insensitively.
    ///
    /// # Returns
    ///
    /// * `Some(Some(value))` - The key exists and its secret has fetched
    /// * `Some(None)` - The key exists but its secret has never fetched
    ///   successfully
    /// * `None` - The key is not part of this provider, or [`load`](Self::load)
    ///   has not run yet
    pub fn try_get(&self, key: &str) -> Option<Option<String>> {
        let data = match self.core.data.read() {
            Ok(data) => data,
            Err(poisoned) => poisoned.into_inner(),
        };
        data.get(&SecretKey::from(key)).cloned()
    }

    /// Returns whether the provider knows the key, ASCII case-insensitively.
    pub fn contains_key(&self, key: &str) -> bool {
        self.try_get(key).is_some()
    }

    /// Returns every known key, in its original spelling.
    pub fn keys(&self) -> Vec<SecretKey> {
        let data = match self.core.data.read() {
            Ok(data) => data,
            Err(poisoned) => poisoned.into_inner(),
        };
        data.keys().cloned().collect()
    }

    /// Returns the number of known keys. Zero until the first load.
    pub fn len(&self) -> usize {
        let data = match self.core.data.read() {
            Ok(data) => data,
            Err(poisoned) => poisoned.into_inner(),
        };
        data.len()
    }

    /// Returns whether no keys are known yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether the reload timer has been armed.
    ///
    /// The timer is armed by the first [`load`](Self::load) call and stays
    /// armed until [`stop`](Self::stop) — including when the interval is
    /// [`ReloadInterval::Never`], in which case it simply never fires.
    pub fn is_timer_armed(&self) -> bool {
        self.timer_thread.is_some()
    }

    /// Cancels the reload timer and waits for it to wind down.
    ///
    /// An in-flight timer-driven load is not interrupted; this call returns
    /// once it completes. Dropping the provider stops it implicitly.
    pub fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.timer_thread.take() {
            if handle.join().is_err() {
                tracing::error!("failed to join reload timer thread for provider '{}'", self.core.name);
            }
        }
    }

    /// Arms the reload timer. Idempotent: later calls are no-ops.
    fn arm_timer(&mut self) {
        if self.timer_thread.is_some() {
            return;
        }

        let (stop_tx, stop_rx) = channel();
        let core = Arc::clone(&self.core);
        let interval = self.reload_interval;

        let timer_thread = thread::spawn(move || match interval {
            ReloadInterval::Never => {
                // Live, disposable handle that never fires.
                let _ = stop_rx.recv();
            }
            ReloadInterval::Every(period) => loop {
                match stop_rx.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => {
                        // Catch-and-log so a panicking hook cannot silently
                        // kill future reloads.
                        if let Err(panic) = catch_unwind(AssertUnwindSafe(|| core.load_once())) {
                            tracing::error!(
                                "reload failed in provider '{}': {}",
                                core.name,
                                panic_message(&panic)
                            );
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            },
        });

        self.stop_tx = Some(stop_tx);
        self.timer_thread = Some(timer_thread);

        tracing::debug!(
            "reload timer armed for provider '{}' ({:?})",
            self.core.name,
            self.reload_interval
        );
    }
}

impl Drop for SecretsConfigurationProvider {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for SecretsConfigurationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretsConfigurationProvider")
            .field("name", &self.core.name)
            .field("secrets", &self.core.secrets.len())
            .field("reload_interval", &self.reload_interval)
            .field("timer_armed", &self.timer_thread.is_some())
            .finish()
    }
}

impl ProviderCore {
    /// Runs one load: fetch every secret, diff against the cache, signal on
    /// change. Loads are serialized by the load guard.
    fn load_once(&self) {
        let _guard = match self.load_guard.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        tracing::debug!(
            "loading {} secrets in provider '{}'",
            self.secrets.len(),
            self.name
        );

        let mut fetched: Vec<(SecretKey, Option<String>)> =
            Vec::with_capacity(self.secrets.len());
        for secret in &self.secrets {
            let key = SecretKey::from(secret.configuration_key());
            match secret.get_value() {
                Ok(value) => fetched.push((key, Some(value))),
                Err(error) => {
                    tracing::warn!(
                        "failed to fetch secret '{}' in provider '{}': {}",
                        key,
                        self.name,
                        error
                    );
                    if let Some(hook) = &self.on_secret_exception {
                        hook(SecretExceptionContext::new(
                            &self.name,
                            secret.as_ref(),
                            &error,
                        ));
                    }
                    fetched.push((key, None));
                }
            }
        }

        let mut changed = false;
        {
            let mut data = match self.data.write() {
                Ok(data) => data,
                Err(poisoned) => poisoned.into_inner(),
            };

            if data.is_empty() {
                // First load: store everything, failed fetches included, so
                // "key exists, value absent" is distinguishable from "key
                // missing".
                for (key, value) in fetched {
                    data.insert(key, value);
                }
            } else {
                for (key, value) in fetched {
                    // A transient failure never erases a known-good value.
                    let Some(value) = value else { continue };
                    let unchanged = matches!(data.get(&key), Some(Some(current)) if *current == value);
                    if !unchanged {
                        data.insert(key, Some(value));
                        changed = true;
                    }
                }
            }
        }

        if changed {
            tracing::info!("secret values changed in provider '{}', signaling reload", self.name);
            let callback = {
                let slot = match self.on_reload.read() {
                    Ok(slot) => slot,
                    Err(poisoned) => poisoned.into_inner(),
                };
                slot.clone()
            };
            if let Some(callback) = callback {
                callback();
            }
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "<non-string panic payload>"
    }
}
