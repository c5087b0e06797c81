// SPDX-License-Identifier: MIT OR Apache-2.0

//! A secrets-backed configuration layer.
//!
//! This crate loads named secrets from a secret store into a flat,
//! case-insensitive key/value map that can be merged into an application's
//! layered configuration. Secrets are refreshed on a background timer, and a
//! secret that fails to fetch never takes the rest of the batch down with it.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`SecretKey`, `SecretPayload`, errors)
//! - **Ports**: Trait definitions (`Secret`, `SecretsProvider`, `SecretFetcher`)
//! - **Adapters**: Concrete secrets and providers (store-backed, static, composite)
//! - **Source**: The configuration source/provider pair and its reload protocol
//!
//! # Features
//!
//! - **Pluggable secrets**: Any type implementing the `Secret` trait can back
//!   a configuration key
//! - **Background reload**: A recurring timer re-fetches all secrets and
//!   signals the owning configuration hierarchy when values change
//! - **Failure isolation**: A fetch failure is routed to an optional exception
//!   hook and leaves the key at its last known value
//! - **Discovery**: Secret definitions can be read from a configuration
//!   section and resolved through a typed registry
//!
//! # Feature Flags
//!
//! - `discovery`: Enable reading secret definitions from a YAML configuration
//!   section (default)
//!
//! # Quick Start
//!
//! ```rust
//! use secretcfg::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> secretcfg::domain::Result<()> {
//! let mut source = SecretsConfigurationSource::new();
//! source.add_secret(Arc::new(StaticSecret::new("app.token", "sekrit")));
//! source.disable_reload();
//!
//! let mut provider = source.build(&BuildContext::new())?;
//! provider.load();
//!
//! assert_eq!(provider.try_get("APP.TOKEN"), Some(Some("sekrit".to_string())));
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod source;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{Result, SecretKey, SecretPayload, SecretsError};
    pub use crate::ports::{FetchError, Secret, SecretFetcher, SecretsProvider};

    pub use crate::adapters::{
        CompositeSecretsProvider, MemoryFetcher, StaticSecret, StaticSecretsProvider, StoreSecret,
    };

    pub use crate::source::{
        BuildContext, ReloadCallback, ReloadInterval, SecretExceptionContext, SecretExceptionHook,
        SecretsConfigurationBuilder, SecretsConfigurationProvider, SecretsConfigurationSource,
    };

    #[cfg(feature = "discovery")]
    pub use crate::source::{SecretDescriptor, SecretRegistry};
}
