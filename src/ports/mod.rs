// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that define the
//! interfaces for the secrets configuration system. The [`Secret`] and
//! [`SecretsProvider`] traits are implemented by adapters in the adapters
//! layer; [`SecretFetcher`] is the seam to the external secret-store client.

pub mod fetcher;
pub mod secret;
pub mod secrets_provider;

// Re-export commonly used types
pub use fetcher::{FetchError, SecretFetcher};
pub use secret::Secret;
pub use secrets_provider::SecretsProvider;
