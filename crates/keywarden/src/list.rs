// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `keywarden list` command implementation.
//!
//! Enumerates stored keys per namespace on the selected backend.
//! If `--json` is passed, outputs structured JSON for scripting.
//! If `--plain` is passed or stdout is not a TTY, disables colors.

use std::io::IsTerminal;

use serde::Serialize;

use keywarden_core::{Backend, KeywardenError, SecretNamespace, SecretStore};

/// Structured listing for `--json` mode.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub backend: String,
    pub namespaces: Vec<NamespaceListing>,
}

/// Keys stored under one namespace.
#[derive(Debug, Serialize)]
pub struct NamespaceListing {
    pub namespace: String,
    pub label: String,
    pub keys: Vec<String>,
}

/// Collect the listing for every namespace in canonical order.
pub fn build_listing(
    store: &dyn SecretStore,
    backend: Backend,
) -> Result<ListResponse, KeywardenError> {
    let mut namespaces = Vec::with_capacity(SecretNamespace::ALL.len());
    for namespace in SecretNamespace::ALL {
        let keys = store.keys(namespace)?;
        namespaces.push(NamespaceListing {
            namespace: namespace.to_string(),
            label: namespace.label().to_string(),
            keys,
        });
    }
    Ok(ListResponse {
        backend: backend.to_string(),
        namespaces,
    })
}

/// Run the `keywarden list` command.
pub fn run_list(
    store: &dyn SecretStore,
    backend: Backend,
    json: bool,
    plain: bool,
) -> Result<(), KeywardenError> {
    let listing = build_listing(store, backend)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&listing).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    print_listing(&listing, use_color);
    Ok(())
}

/// Print the listing as indented text with optional colors.
fn print_listing(listing: &ListResponse, use_color: bool) {
    println!();
    println!("  secrets on the {} backend", listing.backend);
    println!("  {}", "-".repeat(35));

    for entry in &listing.namespaces {
        if use_color {
            use colored::Colorize;
            println!("    {} ({})", entry.label.cyan().bold(), entry.keys.len());
        } else {
            println!("    {} ({})", entry.label, entry.keys.len());
        }
        for key in &entry.keys {
            println!("      {key}");
        }
    }
    println!();
}
