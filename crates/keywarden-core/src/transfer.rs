// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Copying secrets between two stores.
//!
//! [`copy_secrets`] walks the namespaces in their canonical order and copies
//! every key it finds, one read and one write at a time. The first failure
//! aborts the whole run; whatever was written before the failure stays in the
//! destination, and the source is never modified.

use thiserror::Error;
use tracing::{debug, info};

use crate::store::{SecretStore, StoreError};
use crate::types::SecretNamespace;

/// A failure that aborted a copy run.
///
/// Each variant records the namespace being processed and, where one exists,
/// the key in flight, so the operator can tell exactly how far the run got.
#[derive(Debug, Error)]
pub enum CopyError {
    /// Listing the namespace keys in the source store failed.
    #[error("failed to list {} in the source store: {source}", .namespace.label())]
    Enumerate {
        namespace: SecretNamespace,
        source: StoreError,
    },

    /// Reading a secret from the source store failed.
    #[error("failed to read {namespace} secret `{key}` from the source store: {source}")]
    Read {
        namespace: SecretNamespace,
        key: String,
        source: StoreError,
    },

    /// Writing a secret to the destination store failed.
    #[error("failed to write {namespace} secret `{key}` to the destination store: {source}")]
    Write {
        namespace: SecretNamespace,
        key: String,
        source: StoreError,
    },
}

impl CopyError {
    /// The namespace being processed when the run aborted.
    pub fn namespace(&self) -> SecretNamespace {
        match self {
            CopyError::Enumerate { namespace, .. }
            | CopyError::Read { namespace, .. }
            | CopyError::Write { namespace, .. } => *namespace,
        }
    }

    /// The key in flight when the run aborted, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            CopyError::Enumerate { .. } => None,
            CopyError::Read { key, .. } | CopyError::Write { key, .. } => Some(key),
        }
    }
}

/// Outcome of a copy run: per-namespace counts plus the aborting failure,
/// if there was one. Counts reflect fully completed read/write pairs, so a
/// partial run still reports how much landed in the destination.
#[derive(Debug, Default)]
pub struct CopyReport {
    pub credentials: u64,
    pub oidc_tokens: u64,
    pub sessions: u64,
    pub failure: Option<CopyError>,
}

impl CopyReport {
    /// Count of secrets copied in `namespace`.
    pub fn count(&self, namespace: SecretNamespace) -> u64 {
        match namespace {
            SecretNamespace::Credential => self.credentials,
            SecretNamespace::OidcToken => self.oidc_tokens,
            SecretNamespace::Session => self.sessions,
        }
    }

    fn count_mut(&mut self, namespace: SecretNamespace) -> &mut u64 {
        match namespace {
            SecretNamespace::Credential => &mut self.credentials,
            SecretNamespace::OidcToken => &mut self.oidc_tokens,
            SecretNamespace::Session => &mut self.sessions,
        }
    }

    /// Total secrets copied across all namespaces.
    pub fn total(&self) -> u64 {
        self.credentials + self.oidc_tokens + self.sessions
    }

    /// Whether the run finished without aborting.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Copies every secret from `source` into `destination`.
///
/// Namespaces are processed in [`SecretNamespace::ALL`] order. Within a
/// namespace, keys are enumerated once up front and then copied in the order
/// the source reported them. Existing destination values under the same key
/// are overwritten. On the first failure the run stops: no later namespace
/// is enumerated and no later key is touched.
pub fn copy_secrets(source: &dyn SecretStore, destination: &dyn SecretStore) -> CopyReport {
    let mut report = CopyReport::default();

    for namespace in SecretNamespace::ALL {
        info!(namespace = %namespace, "copying secrets");

        let keys = match source.keys(namespace) {
            Ok(keys) => keys,
            Err(err) => {
                report.failure = Some(CopyError::Enumerate {
                    namespace,
                    source: err,
                });
                return report;
            }
        };
        debug!(namespace = %namespace, count = keys.len(), "enumerated source keys");

        for key in keys {
            let payload = match source.get(namespace, &key) {
                Ok(payload) => payload,
                Err(err) => {
                    report.failure = Some(CopyError::Read {
                        namespace,
                        key,
                        source: err,
                    });
                    return report;
                }
            };

            if let Err(err) = destination.set(namespace, &key, payload) {
                report.failure = Some(CopyError::Write {
                    namespace,
                    key,
                    source: err,
                });
                return report;
            }

            debug!(namespace = %namespace, key = %key, "copied secret");
            *report.count_mut(namespace) += 1;
        }
    }

    report
}
