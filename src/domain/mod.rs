// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module contains the core domain types for the secrets-backed
//! configuration layer. It is independent of any external concerns and defines
//! the fundamental concepts used throughout the library.

pub mod errors;
pub mod secret_key;
pub mod secret_payload;

// Re-export commonly used types
pub use errors::{Result, SecretsError};
pub use secret_key::SecretKey;
pub use secret_payload::SecretPayload;
