// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The secret-store contract implemented by every backend.

use thiserror::Error;

use crate::types::{SecretNamespace, SecretPayload};

/// Errors reported by secret-store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested key does not exist in the namespace.
    #[error("secret `{key}` not found")]
    NotFound { key: String },

    /// The key cannot be stored by this backend.
    #[error("invalid secret key `{key}`: {reason}")]
    InvalidKey { key: String, reason: String },

    /// Backend failures (I/O, poisoned locks, corrupt entries).
    #[error("backend error: {message}")]
    Backend {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend {
            message: message.into(),
            source: None,
        }
    }

    pub fn backend_with(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        StoreError::Backend {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// A keyed store of secret payloads, partitioned by namespace.
///
/// Backends are synchronous and callable through a shared reference; any
/// interior locking is the backend's concern. Keys are opaque UTF-8 strings
/// chosen by the caller.
pub trait SecretStore {
    /// Lists every key present in `namespace`.
    ///
    /// The order is stable for an unchanged store and is preserved as-is by
    /// bulk operations. An empty or never-written namespace yields an empty
    /// list, not an error.
    fn keys(&self, namespace: SecretNamespace) -> Result<Vec<String>, StoreError>;

    /// Reads the payload stored under `key`.
    ///
    /// Returns [`StoreError::NotFound`] when the key is absent from the
    /// namespace.
    fn get(&self, namespace: SecretNamespace, key: &str) -> Result<SecretPayload, StoreError>;

    /// Writes `payload` under `key`, replacing any existing value.
    fn set(
        &self,
        namespace: SecretNamespace,
        key: &str,
        payload: SecretPayload,
    ) -> Result<(), StoreError>;
}
