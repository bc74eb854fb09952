// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Closed vocabularies for access-control policies.
//!
//! The string form of every variant is its exact Rust name; matching is
//! case-sensitive everywhere these vocabularies are consumed.

use strum::{Display, EnumString, VariantNames};

/// A single requirement a backend may enforce before releasing a secret.
///
/// Terms never contain `And` or `Or` as a substring; the expression
/// grammar in [`crate::expression`] depends on that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
pub enum AccessControlTerm {
    /// The user must be present, proven by any enrolled factor.
    UserPresence,
    /// Biometry as enrolled right now; re-enrollment invalidates access.
    BiometryCurrentSet,
    /// Any enrolled biometry, surviving re-enrollment.
    BiometryAnySet,
    /// The device passcode.
    DevicePasscode,
    /// Approval from a paired watch.
    Watch,
    /// A separate application-provided password.
    ApplicationPassword,
}

/// Boolean connective joining two adjacent terms in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Conjunction {
    And,
    Or,
}

/// When a stored secret may be read back, for backends that honor
/// accessibility constraints. Absence of a constraint is represented by the
/// empty string at the configuration layer, not by a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
pub enum AccessConstraint {
    AccessibleWhenUnlocked,
    AccessibleAfterFirstUnlock,
    AccessibleAfterFirstUnlockThisDeviceOnly,
    AccessibleWhenPasscodeSetThisDeviceOnly,
    AccessibleWhenUnlockedThisDeviceOnly,
}
