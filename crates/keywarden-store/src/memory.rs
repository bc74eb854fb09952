// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Volatile in-process secret store.
//!
//! Everything lives in a `BTreeMap` behind an `RwLock`, so enumeration
//! order is the lexicographic key order and nothing survives the process.
//! Useful as a copy destination in tests and as a scratch store for dry
//! runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use keywarden_core::{SecretNamespace, SecretPayload, SecretStore, StoreError};

/// In-memory store keyed by namespace, then by secret key.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<SecretNamespace, BTreeMap<String, SecretPayload>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretStore for MemoryStore {
    fn keys(&self, namespace: SecretNamespace) -> Result<Vec<String>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StoreError::backend("memory store lock poisoned"))?;
        Ok(entries
            .get(&namespace)
            .map(|secrets| secrets.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn get(&self, namespace: SecretNamespace, key: &str) -> Result<SecretPayload, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StoreError::backend("memory store lock poisoned"))?;
        entries
            .get(&namespace)
            .and_then(|secrets| secrets.get(key))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_string(),
            })
    }

    fn set(
        &self,
        namespace: SecretNamespace,
        key: &str,
        payload: SecretPayload,
    ) -> Result<(), StoreError> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey {
                key: key.to_string(),
                reason: "key must not be empty".to_string(),
            });
        }
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::backend("memory store lock poisoned"))?;
        entries
            .entry(namespace)
            .or_default()
            .insert(key.to_string(), payload);
        Ok(())
    }
}
