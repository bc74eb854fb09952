// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Keywarden secret manager.

use thiserror::Error;

use crate::store::StoreError;
use crate::transfer::CopyError;

/// The primary error type surfaced by Keywarden commands.
///
/// Configuration problems found during startup validation are rendered as
/// rich diagnostics before this type comes into play; `Config` only carries
/// the plain-text cases that bypass that path.
#[derive(Debug, Error)]
pub enum KeywardenError {
    /// Configuration errors (unreadable files, malformed values).
    #[error("configuration error: {0}")]
    Config(String),

    /// A backend name that does not match any available backend.
    #[error("unknown backend `{name}` (available: {available})")]
    UnknownBackend { name: String, available: String },

    /// Secret store failures.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A copy run aborted partway through.
    #[error(transparent)]
    Copy(#[from] CopyError),

    /// I/O failures on stdin or stdout.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
