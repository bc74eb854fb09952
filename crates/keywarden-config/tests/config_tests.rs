// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Keywarden configuration system.

use keywarden_config::diagnostic::{ConfigError, suggest_key};
use keywarden_config::model::KeywardenConfig;
use keywarden_config::{load_and_validate_str, load_config_from_str};
use keywarden_policy::PolicyError;

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_keywarden_config() {
    let toml = r#"
[store]
backend = "memory"
file_dir = "/tmp/keywarden-test"

[access]
control = "UserPresence"
constraint = ""

[log]
level = "debug"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.store.backend.as_deref(), Some("memory"));
    assert_eq!(config.store.file_dir, "/tmp/keywarden-test");
    assert_eq!(config.access.control, "UserPresence");
    assert_eq!(config.access.constraint, "");
    assert_eq!(config.log.level, "debug");
}

/// Unknown field in [store] section produces an error.
#[test]
fn unknown_field_in_store_produces_error() {
    let toml = r#"
[store]
backned = "file"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    // Figment wraps serde's deny_unknown_fields error
    assert!(
        err_str.contains("unknown field") || err_str.contains("backned"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let toml = "";
    let config = load_config_from_str(toml).expect("empty TOML should use defaults");

    assert!(config.store.backend.is_none());
    assert!(config.store.file_dir.contains(".keywarden"));
    assert_eq!(config.access.control, "UserPresence");
    assert_eq!(config.access.constraint, "");
    assert_eq!(config.log.level, "info");
}

/// A later layer overrides store.backend from TOML.
#[test]
fn override_layer_wins_for_store_backend() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let toml_content = r#"
[store]
backend = "file"
"#;

    let config: KeywardenConfig = Figment::new()
        .merge(Serialized::defaults(KeywardenConfig::default()))
        .merge(Toml::string(toml_content))
        .merge(("store.backend", "memory"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.store.backend.as_deref(), Some("memory"));
}

/// Dotted-path overrides reach underscore-containing keys
/// (store.file_dir, not store.file.dir).
#[test]
fn override_reaches_file_dir() {
    use figment::{Figment, providers::Serialized};

    let config: KeywardenConfig = Figment::new()
        .merge(Serialized::defaults(KeywardenConfig::default()))
        .merge(("store.file_dir", "/srv/keywarden"))
        .extract()
        .expect("should set file_dir via dot notation");

    assert_eq!(config.store.file_dir, "/srv/keywarden");
}

/// Serialized defaults provide sensible values for all fields.
#[test]
fn serialized_defaults_are_sensible() {
    let config = KeywardenConfig::default();

    assert!(config.store.backend.is_none());
    assert!(!config.store.file_dir.is_empty());
    assert_eq!(config.access.control, "UserPresence");
    assert!(config.access.constraint.is_empty());
    assert_eq!(config.log.level, "info");
}

/// Missing config files are silently skipped (Figment's Toml::file() behavior).
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: KeywardenConfig = Figment::new()
        .merge(Serialized::defaults(KeywardenConfig::default()))
        .merge(Toml::file("/nonexistent/path/keywarden.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    // Should just get defaults
    assert_eq!(config.access.control, "UserPresence");
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[keyring]
backend = "file"
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("keyring"),
        "error should mention unknown field, got: {err_str}"
    );
}

// ============================================================================
// Diagnostic tests
// ============================================================================

/// Unknown key "backned" in [store] produces suggestion "did you mean `backend`?"
#[test]
fn diagnostic_backned_suggests_backend() {
    let valid_keys = &["backend", "file_dir"];
    let suggestion = suggest_key("backned", valid_keys);
    assert_eq!(suggestion, Some("backend".to_string()));
}

/// Unknown key "zzzzzz" with no close match does NOT produce a suggestion.
#[test]
fn diagnostic_no_suggestion_for_distant_typo() {
    let valid_keys = &["backend", "file_dir"];
    let suggestion = suggest_key("zzzzzz", valid_keys);
    assert!(suggestion.is_none(), "should not suggest for distant typo");
}

/// Error output from load_and_validate_str includes the unknown key name.
#[test]
fn diagnostic_error_includes_unknown_key() {
    let toml = r#"
[store]
backned = "file"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    assert!(!errors.is_empty(), "should have at least one error");

    let has_unknown_key = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "backned"
                && suggestion.as_deref() == Some("backend")
                && valid_keys.contains("file_dir")
        })
    });
    assert!(
        has_unknown_key,
        "should have UnknownKey error for 'backned' with suggestion 'backend', got: {errors:?}"
    );
}

/// Invalid type (number where string expected) produces clear message.
#[test]
fn diagnostic_invalid_type_message() {
    let toml = r#"
[access]
control = 5
"#;

    let err = load_config_from_str(toml).expect_err("should reject invalid type");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("invalid type") || err_str.contains("control"),
        "error should mention type mismatch, got: {err_str}"
    );
}

/// ConfigError implements miette::Diagnostic (can be rendered).
#[test]
fn config_error_implements_diagnostic() {
    use miette::Diagnostic;

    let error = ConfigError::UnknownKey {
        key: "backned".to_string(),
        suggestion: Some("backend".to_string()),
        valid_keys: "backend, file_dir".to_string(),
        span: None,
        src: None,
    };

    // Verify it implements Diagnostic
    let code = error.code();
    assert!(code.is_some(), "should have diagnostic code");

    let help = error.help();
    assert!(help.is_some(), "should have help text");
    let help_str = help.unwrap().to_string();
    assert!(
        help_str.contains("did you mean `backend`"),
        "help should contain suggestion, got: {help_str}"
    );
}

/// ConfigError can be rendered using miette's graphical handler.
#[test]
fn config_error_renders_with_miette() {
    use miette::GraphicalReportHandler;

    let error = ConfigError::UnknownBackend {
        name: "keychain".to_string(),
        suggestion: None,
        available: "file, memory".to_string(),
    };

    let handler = GraphicalReportHandler::new();
    let mut buf = String::new();
    handler
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(!buf.is_empty(), "rendered report should not be empty");
    assert!(
        buf.contains("keychain"),
        "rendered report should mention the backend"
    );
}

/// A rejected access-control expression surfaces as a policy diagnostic
/// with its span intact.
#[test]
fn diagnostic_access_control_passes_through() {
    let toml = r#"
[access]
control = "UserPresenceAndUserPresence"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let has_duplicate = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::AccessControl(PolicyError::DuplicateTerm { term, span, .. })
                if term == "UserPresence" && span.offset() == 15
        )
    });
    assert!(
        has_duplicate,
        "should carry the policy diagnostic through, got: {errors:?}"
    );
}

/// load_and_validate_str with valid TOML returns Ok config.
#[test]
fn load_and_validate_valid_toml() {
    let toml = r#"
[store]
backend = "memory"
"#;

    let config = load_and_validate_str(toml).expect("valid TOML should validate");
    assert_eq!(config.store.backend.as_deref(), Some("memory"));
}

/// Validation catches an unknown backend by name.
#[test]
fn validation_catches_unknown_backend() {
    let toml = r#"
[store]
backend = "keychain"
"#;

    let errors = load_and_validate_str(toml).expect_err("unknown backend should fail");
    let has_unknown_backend = errors
        .iter()
        .any(|e| matches!(e, ConfigError::UnknownBackend { name, .. } if name == "keychain"));
    assert!(
        has_unknown_backend,
        "should have UnknownBackend error, got: {errors:?}"
    );
}

/// Validation rejects a non-default expression when no backend can
/// enforce it.
#[test]
fn validation_catches_unenforceable_expression() {
    let toml = r#"
[access]
control = "DevicePasscodeOrWatch"
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    let has_capability_error = errors.iter().any(|e| {
        matches!(e, ConfigError::Validation { message } if message.contains("not supported"))
    });
    assert!(
        has_capability_error,
        "should flag the capability mismatch, got: {errors:?}"
    );
}

/// KEYWARDEN_STORE_BACKEND reaches store.backend through the env layer.
#[test]
fn env_var_overrides_store_backend() {
    // SAFETY: test-only env mutation. Tests using env vars must not run in parallel.
    unsafe { std::env::set_var("KEYWARDEN_STORE_BACKEND", "memory") };
    let config = keywarden_config::load_config();
    unsafe { std::env::remove_var("KEYWARDEN_STORE_BACKEND") };

    let config = config.expect("env-only config should load");
    assert_eq!(config.store.backend.as_deref(), Some("memory"));
}

/// KEYWARDEN_STORE_FILE_DIR maps to store.file_dir, not store.file.dir.
/// This is the case the explicit section mapping exists for.
#[test]
fn env_var_with_underscore_key_maps_to_one_field() {
    unsafe { std::env::set_var("KEYWARDEN_STORE_FILE_DIR", "/tmp/from-env") };
    let config = keywarden_config::load_config();
    unsafe { std::env::remove_var("KEYWARDEN_STORE_FILE_DIR") };

    let config = config.expect("env-only config should load");
    assert_eq!(config.store.file_dir, "/tmp/from-env");
}
