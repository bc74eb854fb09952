// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `keywarden get` command implementation.

use std::io::{self, Write};

use keywarden_core::{KeywardenError, SecretNamespace, SecretStore};

/// Run the `keywarden get` command.
///
/// The payload bytes go to stdout verbatim, with no trailing newline, so
/// binary secrets survive a pipe.
pub fn run_get(
    store: &dyn SecretStore,
    namespace: SecretNamespace,
    key: &str,
) -> Result<(), KeywardenError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_secret(store, namespace, key, &mut out)
}

fn write_secret(
    store: &dyn SecretStore,
    namespace: SecretNamespace,
    key: &str,
    out: &mut impl Write,
) -> Result<(), KeywardenError> {
    let payload = store.get(namespace, key)?;
    out.write_all(payload.as_bytes())?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use keywarden_core::{SecretPayload, StoreError};
    use keywarden_store::MemoryStore;

    #[test]
    fn write_secret_emits_raw_bytes() {
        let store = MemoryStore::new();
        store
            .set(
                SecretNamespace::Credential,
                "binary",
                SecretPayload::from(&[0u8, 159, 146, 150][..]),
            )
            .unwrap();

        let mut out = Vec::new();
        write_secret(&store, SecretNamespace::Credential, "binary", &mut out).unwrap();
        assert_eq!(out, [0u8, 159, 146, 150]);
    }

    #[test]
    fn missing_key_surfaces_not_found() {
        let store = MemoryStore::new();
        let mut out = Vec::new();
        let err = write_secret(&store, SecretNamespace::Session, "ghost", &mut out).unwrap_err();
        assert!(matches!(
            err,
            KeywardenError::Store(StoreError::NotFound { .. })
        ));
        assert!(out.is_empty());
    }
}
