// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the secrets configuration crate.
//!
//! This module defines the error types that can occur when building a secrets
//! configuration source or fetching secret values. All errors use `thiserror`
//! for proper error handling and conversion.

use thiserror::Error;

/// The main error type for secrets configuration operations.
///
/// This enum represents all possible errors that can occur when validating,
/// building, loading, or discovering secrets. It is marked as
/// `#[non_exhaustive]` to allow for future additions without breaking
/// backwards compatibility.
///
/// Construction errors (`NoSecrets`, `EmptySecretKey`, `DuplicateSecretKey`)
/// are fatal and surface synchronously from a build; fetch errors
/// (`FetchFailed`, `SecretNotFound`, `ParseError`) are recoverable and are
/// isolated per secret during a load.
///
/// # Examples
///
/// ```
/// use secretcfg::domain::errors::SecretsError;
///
/// fn get_secret_value() -> Result<String, SecretsError> {
///     Err(SecretsError::SecretNotFound {
///         secret_id: "prod/db".to_string(),
///         secret_key: Some("password".to_string()),
///         configuration_key: "Database.Password".to_string(),
///     })
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SecretsError {
    /// The secrets source was built without any secrets.
    #[error("secrets source '{source_name}' contains no secrets")]
    NoSecrets {
        /// The name of the offending source
        source_name: String,
    },

    /// A secret in the source reported an empty configuration key.
    #[error("secret at index {index} has an empty configuration key")]
    EmptySecretKey {
        /// Position of the offending secret in the source's list
        index: usize,
    },

    /// Two secrets in the source share a configuration key, ignoring case.
    #[error("duplicate configuration key (case-insensitive): '{key}'")]
    DuplicateSecretKey {
        /// The duplicated key, in the spelling of the later occurrence
        key: String,
    },

    /// The store held no usable value for a secret.
    #[error(
        "no secret was found with the secret id '{secret_id}'{} for the configuration key '{configuration_key}'",
        fmt_secret_key(.secret_key)
    )]
    SecretNotFound {
        /// The identifier of the secret in the store
        secret_id: String,
        /// The sub-key within a structured secret, if one was requested
        secret_key: Option<String>,
        /// The configuration key the secret maps to
        configuration_key: String,
    },

    /// The store client failed while fetching a secret.
    #[error("failed to fetch secret for configuration key '{configuration_key}': {source}")]
    FetchFailed {
        /// The configuration key the secret maps to
        configuration_key: String,
        /// The underlying client error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse a secret value or definition.
    #[error("failed to parse secret value: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to read secret definitions from the configuration tree.
    #[error("secret discovery failed: {message}")]
    DiscoveryError {
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A discovered secret definition named a type no factory is registered for.
    #[error("unknown secret type '{kind}' in configuration section")]
    UnknownSecretKind {
        /// The unrecognized discriminator value
        kind: String,
    },
}

fn fmt_secret_key(secret_key: &Option<String>) -> String {
    match secret_key {
        Some(key) => format!(" and secret key '{key}'"),
        None => String::new(),
    }
}

/// A specialized Result type for secrets configuration operations.
pub type Result<T> = std::result::Result<T, SecretsError>;
