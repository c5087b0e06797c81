// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source layer containing the configuration source/provider pair.
//!
//! This module contains the core of the crate: the declarative
//! [`SecretsConfigurationSource`], the running [`SecretsConfigurationProvider`]
//! with its reload protocol, the fluent [`SecretsConfigurationBuilder`], and
//! the [`BuildContext`] seam to the owning configuration hierarchy.

pub mod builder;
pub mod context;
pub mod exception;
pub mod provider;
#[cfg(feature = "discovery")]
pub mod registry;
pub mod secrets_source;

// Re-export commonly used types
pub use builder::SecretsConfigurationBuilder;
pub use context::BuildContext;
#[cfg(feature = "discovery")]
pub use context::{SECRETS_SECTION, SECRETS_SECTION_ALIAS};
pub use exception::{ReloadCallback, SecretExceptionContext, SecretExceptionHook};
pub use provider::SecretsConfigurationProvider;
#[cfg(feature = "discovery")]
pub use registry::{SecretDescriptor, SecretFactory, SecretRegistry};
pub use secrets_source::{ReloadInterval, SecretsConfigurationSource};
