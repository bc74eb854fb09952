// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Keywarden secret manager.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// The access-control expression assumed when none is configured.
pub const DEFAULT_ACCESS_CONTROL: &str = "UserPresence";

/// Top-level Keywarden configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KeywardenConfig {
    /// Secret store selection and backend settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Access-control policy applied to stored secrets.
    #[serde(default)]
    pub access: AccessConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Secret store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Backend to use (`file` or `memory`). `None` selects the default
    /// backend.
    #[serde(default)]
    pub backend: Option<String>,

    /// Directory the `file` backend keeps its secrets in. A leading `~/`
    /// is expanded to the home directory when the store is opened.
    #[serde(default = "default_file_dir")]
    pub file_dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: None,
            file_dir: default_file_dir(),
        }
    }
}

fn default_file_dir() -> String {
    dirs::home_dir()
        .map(|home| home.join(".keywarden").join("keys"))
        .unwrap_or_else(|| std::path::PathBuf::from(".keywarden/keys"))
        .to_string_lossy()
        .into_owned()
}

/// Access-control policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AccessConfig {
    /// Access-control expression required when secrets are stored, for
    /// example `UserPresenceAndBiometryAnySet`. Validated on every startup;
    /// enforced only by backends that support it.
    #[serde(default = "default_access_control")]
    pub control: String,

    /// Accessibility constraint for stored secrets, for example
    /// `AccessibleWhenUnlocked`. Empty means no constraint.
    #[serde(default)]
    pub constraint: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            control: default_access_control(),
            constraint: String::new(),
        }
    }
}

fn default_access_control() -> String {
    DEFAULT_ACCESS_CONTROL.to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
