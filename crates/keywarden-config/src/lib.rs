// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Keywarden secret manager.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, environment variable
//! overrides, and Elm-style diagnostic error rendering with typo
//! suggestions. Startup validation also covers the access-control policy:
//! the expression grammar, the constraint vocabulary, and whether the
//! selected backend can enforce what is configured.
//!
//! # Usage
//!
//! ```no_run
//! use keywarden_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Backend: {:?}", config.store.backend);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::KeywardenConfig;
pub use validation::validate_config;

use std::path::Path;

/// Load configuration from the XDG hierarchy and validate it.
///
/// This is the high-level entry point that:
/// 1. Loads config from TOML files + env vars via Figment
/// 2. On success: runs post-deserialization validation
/// 3. On Figment error: converts to rich miette diagnostics with typo suggestions
///
/// Returns either a valid `KeywardenConfig` or a list of diagnostic errors.
pub fn load_and_validate() -> Result<KeywardenConfig, Vec<ConfigError>> {
    let config = load_unvalidated()?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Load configuration from the XDG hierarchy without running validation.
///
/// The CLI applies flag overrides between loading and validating, so the
/// two phases are exposed separately. Figment errors still come back as
/// rich diagnostics.
pub fn load_unvalidated() -> Result<KeywardenConfig, Vec<ConfigError>> {
    loader::load_config().map_err(|err| {
        // Read TOML source files for error source span information
        let toml_sources = collect_toml_sources();
        diagnostic::figment_to_config_errors(err, &toml_sources)
    })
}

/// Load configuration from one explicit TOML file (plus env overrides)
/// without running validation.
pub fn load_unvalidated_from_path(path: &Path) -> Result<KeywardenConfig, Vec<ConfigError>> {
    loader::load_config_from_path(path).map_err(|err| {
        let mut toml_sources = Vec::new();
        if let Ok(content) = std::fs::read_to_string(path) {
            toml_sources.push((path.display().to_string(), content));
        }
        diagnostic::figment_to_config_errors(err, &toml_sources)
    })
}

/// Load configuration from a specific TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<KeywardenConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut sources = Vec::new();

    // Local config
    if let Ok(content) = std::fs::read_to_string("keywarden.toml") {
        let path = std::env::current_dir()
            .map(|d| d.join("keywarden.toml").display().to_string())
            .unwrap_or_else(|_| "keywarden.toml".to_string());
        sources.push((path, content));
    }

    // XDG user config
    if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("keywarden/keywarden.toml");
        if let Ok(content) = std::fs::read_to_string(&path) {
            sources.push((path.display().to_string(), content));
        }
    }

    // System config
    let system_path = std::path::Path::new("/etc/keywarden/keywarden.toml");
    if let Ok(content) = std::fs::read_to_string(system_path) {
        sources.push((system_path.display().to_string(), content));
    }

    sources
}
