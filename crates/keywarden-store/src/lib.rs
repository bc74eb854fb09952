// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret store backends for Keywarden.
//!
//! Two portable backends implement [`SecretStore`]: [`FileStore`] keeps one
//! file per secret under a root directory, [`MemoryStore`] keeps everything
//! in process memory. [`open_backend`] maps a configured [`Backend`]
//! selection to a running store.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use tracing::debug;

use keywarden_core::{Backend, SecretStore, StoreError};

/// Open the selected backend.
///
/// `file_dir` is the root directory for the `file` backend, with a leading
/// `~` expanded to the home directory. The `memory` backend ignores it and
/// starts empty.
pub fn open_backend(
    backend: Backend,
    file_dir: &str,
) -> Result<Box<dyn SecretStore>, StoreError> {
    debug!(backend = %backend, "opening secret store");
    match backend {
        Backend::File => Ok(Box::new(FileStore::open(expand_tilde(file_dir))?)),
        Backend::Memory => Ok(Box::new(MemoryStore::new())),
    }
}

/// Expand a leading `~` or `~/` to the home directory. Paths without a
/// tilde, and tildes elsewhere in the path, pass through unchanged.
fn expand_tilde(dir: &str) -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        if dir == "~" {
            return home;
        }
        if let Some(rest) = dir.strip_prefix("~/") {
            return home.join(rest);
        }
    }
    PathBuf::from(dir)
}
