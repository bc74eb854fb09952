// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: backend membership, the access-control expression, the
//! accessibility constraint, and backend capability mismatches.

use std::str::FromStr;

use strum::VariantNames;

use keywarden_core::Backend;
use keywarden_policy::{AccessConstraint, AccessControlTerm, validate_expression};

use crate::diagnostic::{ConfigError, suggest_key};
use crate::model::{DEFAULT_ACCESS_CONTROL, KeywardenConfig};

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &KeywardenConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Resolve the backend first; the capability checks below depend on it.
    let backend = match config.store.backend.as_deref() {
        None => Some(Backend::default()),
        Some(name) => match Backend::from_str(name) {
            Ok(backend) => Some(backend),
            Err(_) => {
                errors.push(ConfigError::UnknownBackend {
                    name: name.to_string(),
                    suggestion: suggest_key(name, Backend::VARIANTS),
                    available: Backend::VARIANTS.join(", "),
                });
                None
            }
        },
    };

    if config.store.file_dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "store.file_dir must not be empty".to_string(),
        });
    }

    // The access-control expression is validated on every startup, whether
    // or not the selected backend can enforce it.
    if let Err(err) = validate_expression(&config.access.control, AccessControlTerm::VARIANTS) {
        errors.push(ConfigError::AccessControl(err));
    }

    let constraint = config.access.constraint.as_str();
    if !constraint.is_empty() && AccessConstraint::from_str(constraint).is_err() {
        let message = match suggest_key(constraint, AccessConstraint::VARIANTS) {
            Some(suggestion) => format!(
                "access.constraint `{constraint}` is not recognized; did you mean `{suggestion}`?"
            ),
            None => format!(
                "access.constraint `{constraint}` is not recognized; valid constraints: {}",
                AccessConstraint::VARIANTS.join(", "),
            ),
        };
        errors.push(ConfigError::Validation { message });
    }

    // A backend that cannot enforce policies rejects any non-default policy
    // settings rather than silently ignoring them.
    if let Some(backend) = backend
        && !backend.supports_access_control()
    {
        if config.access.control != DEFAULT_ACCESS_CONTROL {
            errors.push(ConfigError::Validation {
                message: format!(
                    "access.control is not supported with the `{backend}` backend; \
                     no available backend enforces access-control policies"
                ),
            });
        }
        if !config.access.constraint.is_empty() {
            errors.push(ConfigError::Validation {
                message: format!(
                    "access.constraint is not supported with the `{backend}` backend"
                ),
            });
        }
    }

    match config.log.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        other => errors.push(ConfigError::Validation {
            message: format!("log.level `{other}` is not one of trace, debug, info, warn, error"),
        }),
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
