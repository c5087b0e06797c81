// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret store client trait definition.
//!
//! This module defines the `SecretFetcher` trait, the seam between this crate
//! and the physical secret-store client (a cloud secrets manager SDK, a vault
//! HTTP client, an in-memory test double). The crate never talks to a store
//! directly; everything goes through this port.

use crate::domain::SecretPayload;

/// The error type a fetch capability may fail with.
///
/// Store clients raise their own error types; this alias lets any of them
/// cross the port boundary unchanged.
pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

/// A client capable of fetching raw secret payloads from a secret store.
///
/// `fetch` is expected to be synchronous or awaited-to-completion: when it
/// returns, the payload is final. Retry and backoff belong to the
/// implementation, not to the callers.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a fetcher is typically shared
/// between many [`StoreSecret`](crate::adapters::StoreSecret)s via `Arc`.
///
/// # Examples
///
/// ```rust
/// use secretcfg::ports::{FetchError, SecretFetcher};
/// use secretcfg::domain::SecretPayload;
///
/// struct SingleSecretClient;
///
/// impl SecretFetcher for SingleSecretClient {
///     fn fetch(&self, secret_id: &str) -> Result<SecretPayload, FetchError> {
///         if secret_id == "prod/token" {
///             Ok(SecretPayload::from_string("sekrit"))
///         } else {
///             Err(format!("no secret with id '{secret_id}'").into())
///         }
///     }
/// }
/// ```
pub trait SecretFetcher: Send + Sync {
    /// Fetches the raw payload for the given store identifier.
    ///
    /// # Arguments
    ///
    /// * `secret_id` - The identifier of the secret within the store
    ///
    /// # Returns
    ///
    /// * `Ok(SecretPayload)` - The raw payload (text, binary, or empty)
    /// * `Err(FetchError)` - The client failed; any error type is allowed
    fn fetch(&self, secret_id: &str) -> Result<SecretPayload, FetchError>;
}
