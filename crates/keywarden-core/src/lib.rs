// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Keywarden secret manager.
//!
//! This crate defines the secret-store contract, the namespace and payload
//! types, the copy orchestration routine, and the error types shared across
//! the Keywarden workspace. Backend implementations live in
//! `keywarden-store`; this crate only defines what they must satisfy.

pub mod error;
pub mod store;
pub mod transfer;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::KeywardenError;
pub use store::{SecretStore, StoreError};
pub use transfer::{CopyError, CopyReport, copy_secrets};
pub use types::{Backend, SecretNamespace, SecretPayload};
