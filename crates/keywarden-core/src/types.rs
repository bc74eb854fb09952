// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Keywarden workspace.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};
use zeroize::Zeroizing;

/// The three kinds of secrets a store manages.
///
/// Namespaces are disjoint: the same key may exist in several namespaces
/// without collision. [`SecretNamespace::ALL`] fixes the canonical order
/// used by operations that span every namespace.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    VariantNames,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SecretNamespace {
    /// Long-lived account credentials.
    Credential,
    /// Cached OIDC tokens obtained during federated sign-in.
    OidcToken,
    /// Short-lived session material derived from credentials.
    Session,
}

impl SecretNamespace {
    /// Canonical processing order for operations covering every namespace.
    pub const ALL: [SecretNamespace; 3] = [
        SecretNamespace::Credential,
        SecretNamespace::OidcToken,
        SecretNamespace::Session,
    ];

    /// Plural label for progress and summary output.
    pub fn label(&self) -> &'static str {
        match self {
            SecretNamespace::Credential => "credentials",
            SecretNamespace::OidcToken => "OIDC tokens",
            SecretNamespace::Session => "sessions",
        }
    }
}

/// Identifies a secret-store backend implementation.
///
/// The string form (`file`, `memory`) is what configuration files, the
/// `KEYWARDEN_STORE_BACKEND` variable, and command-line flags accept.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    VariantNames,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// Flat files under a configurable directory, one file per secret.
    #[default]
    File,
    /// Volatile in-process store, mostly useful for tests and scratch work.
    Memory,
}

impl Backend {
    /// Whether the backend can enforce access-control policies on stored
    /// secrets. None of the portable backends can; validation still runs so
    /// a configuration stays usable on platforms where enforcement exists.
    pub fn supports_access_control(&self) -> bool {
        match self {
            Backend::File | Backend::Memory => false,
        }
    }
}

/// Raw secret bytes.
///
/// The buffer is zeroized on drop and never appears in `Debug` output.
#[derive(Clone)]
pub struct SecretPayload(Zeroizing<Vec<u8>>);

impl SecretPayload {
    pub fn new(bytes: Vec<u8>) -> Self {
        SecretPayload(Zeroizing::new(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for SecretPayload {
    fn from(bytes: Vec<u8>) -> Self {
        SecretPayload::new(bytes)
    }
}

impl From<&[u8]> for SecretPayload {
    fn from(bytes: &[u8]) -> Self {
        SecretPayload::new(bytes.to_vec())
    }
}

impl PartialEq for SecretPayload {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice() == other.0.as_slice()
    }
}

impl Eq for SecretPayload {}

impl fmt::Debug for SecretPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretPayload").field(&"[REDACTED]").finish()
    }
}
