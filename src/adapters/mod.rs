// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing secret and provider implementations.
//!
//! This module contains concrete implementations of the [`Secret`],
//! [`SecretsProvider`], and [`SecretFetcher`] traits defined in the ports
//! layer.
//!
//! [`Secret`]: crate::ports::Secret
//! [`SecretsProvider`]: crate::ports::SecretsProvider
//! [`SecretFetcher`]: crate::ports::SecretFetcher

pub mod composite;
pub mod memory;
pub mod static_provider;
pub mod store_secret;

// Re-export adapters
pub use composite::CompositeSecretsProvider;
pub use memory::MemoryFetcher;
pub use static_provider::{StaticSecret, StaticSecretsProvider};
pub use store_secret::{json_field, StoreSecret};
