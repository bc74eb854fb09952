// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Access-control policies for the Keywarden secret manager.
//!
//! A secret can be guarded by an access-control expression: one term, or
//! several joined by `And`/`Or`, drawn from a closed vocabulary, for
//! example `UserPresenceAndBiometryAnySet`. This crate owns the
//! vocabularies, the expression grammar, and the diagnostics produced when
//! an expression is rejected.
//!
//! Expressions are validated on every startup even when the configured
//! backend cannot enforce them, so a configuration moves cleanly to a
//! platform where enforcement exists.

pub mod diagnostic;
pub mod expression;
pub mod term;

// Re-export key items at crate root for ergonomic imports.
pub use diagnostic::PolicyError;
pub use expression::{AccessControlExpression, validate_expression};
pub use term::{AccessConstraint, AccessControlTerm, Conjunction};
