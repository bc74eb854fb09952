// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `keywarden set` command implementation.
//!
//! The payload is read from stdin rather than a prompt or an argument:
//! arguments leak through shell history and process listings, stdin pipes
//! cleanly from files and password managers.

use std::io::{self, Read};

use keywarden_core::{KeywardenError, SecretNamespace, SecretPayload, SecretStore};

/// Run the `keywarden set` command.
pub fn run_set(
    store: &dyn SecretStore,
    namespace: SecretNamespace,
    key: &str,
) -> Result<(), KeywardenError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let written = store_from_reader(store, namespace, key, &mut input)?;
    println!("Stored {namespace} secret `{key}` ({written} bytes).");
    Ok(())
}

fn store_from_reader(
    store: &dyn SecretStore,
    namespace: SecretNamespace,
    key: &str,
    input: &mut impl Read,
) -> Result<usize, KeywardenError> {
    let mut payload = Vec::new();
    input.read_to_end(&mut payload)?;
    let written = payload.len();
    store.set(namespace, key, SecretPayload::new(payload))?;
    Ok(written)
}
