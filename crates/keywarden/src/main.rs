// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keywarden - typed secrets in pluggable storage backends.
//!
//! This is the binary entry point. It parses the CLI, loads and validates
//! configuration (flag overrides are folded in before validation so they
//! get the same diagnostics as TOML values), initializes tracing, and
//! dispatches to the command modules.

mod copy;
mod get;
mod list;
mod set;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use strum::VariantNames;
use tracing::debug;

use keywarden_config::KeywardenConfig;
use keywarden_core::{Backend, KeywardenError, SecretNamespace, SecretStore};

/// Keywarden - typed secrets in pluggable storage backends.
#[derive(Parser, Debug)]
#[command(name = "keywarden", version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Force debug logging, regardless of the configured log level.
    #[arg(long, global = true)]
    debug: bool,

    /// Secret store backend to operate on.
    #[arg(long, global = true, value_parser = parse_backend)]
    backend: Option<Backend>,

    /// Root directory for the file backend.
    #[arg(long, global = true, value_name = "DIR")]
    file_dir: Option<String>,

    /// Access-control expression: terms joined by And/Or, for example
    /// "UserPresenceOrBiometryCurrentSet".
    #[arg(long, global = true, value_name = "EXPR")]
    access_control: Option<String>,

    /// Keychain accessibility constraint, for example "AccessibleWhenUnlocked".
    #[arg(long, global = true, value_name = "NAME")]
    access_constraint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Copy every secret from one backend to another.
    Copy {
        /// Backend to copy from.
        #[arg(value_parser = parse_backend)]
        source: Backend,
        /// Backend to copy into.
        #[arg(value_parser = parse_backend)]
        destination: Backend,
        /// File root for the source side (defaults to store.file_dir).
        #[arg(long, value_name = "DIR")]
        source_dir: Option<String>,
        /// File root for the destination side (defaults to store.file_dir).
        #[arg(long, value_name = "DIR")]
        destination_dir: Option<String>,
    },
    /// List stored secrets per namespace.
    List {
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Read one secret and write its payload to stdout.
    Get {
        /// Namespace holding the secret.
        #[arg(value_parser = parse_namespace)]
        namespace: SecretNamespace,
        /// Key of the secret.
        key: String,
    },
    /// Store one secret, reading its payload from stdin.
    Set {
        /// Namespace to store the secret under.
        #[arg(value_parser = parse_namespace)]
        namespace: SecretNamespace,
        /// Key of the secret.
        key: String,
    },
}

fn parse_backend(raw: &str) -> Result<Backend, String> {
    raw.parse()
        .map_err(|_| format!("must be one of: {}", Backend::VARIANTS.join(", ")))
}

fn parse_namespace(raw: &str) -> Result<SecretNamespace, String> {
    raw.parse()
        .map_err(|_| format!("must be one of: {}", SecretNamespace::VARIANTS.join(", ")))
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), KeywardenError> {
    let loaded = match &cli.config {
        Some(path) => keywarden_config::load_unvalidated_from_path(path),
        None => keywarden_config::load_unvalidated(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            keywarden_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    apply_overrides(&mut config, &cli);

    init_tracing(&config.log.level);

    if let Err(errors) = keywarden_config::validate_config(&config) {
        keywarden_config::render_errors(&errors);
        std::process::exit(1);
    }
    debug!(
        backend = ?config.store.backend,
        access_control = %config.access.control,
        "configuration validated"
    );

    match cli.command {
        Commands::Copy {
            source,
            destination,
            source_dir,
            destination_dir,
        } => copy::run_copy(
            &config,
            source,
            destination,
            source_dir.as_deref(),
            destination_dir.as_deref(),
        ),
        Commands::List { json, plain } => {
            let backend = resolve_backend(&config)?;
            let store = keywarden_store::open_backend(backend, &config.store.file_dir)?;
            list::run_list(store.as_ref(), backend, json, plain)
        }
        Commands::Get { namespace, key } => {
            let store = open_configured_store(&config)?;
            get::run_get(store.as_ref(), namespace, &key)
        }
        Commands::Set { namespace, key } => {
            let store = open_configured_store(&config)?;
            set::run_set(store.as_ref(), namespace, &key)
        }
    }
}

/// Fold CLI flag overrides into the loaded configuration.
///
/// Runs before validation, so a bad flag value gets the same diagnostic
/// treatment as a bad TOML value.
fn apply_overrides(config: &mut KeywardenConfig, cli: &Cli) {
    if let Some(backend) = cli.backend {
        config.store.backend = Some(backend.to_string());
    }
    if let Some(file_dir) = &cli.file_dir {
        config.store.file_dir = file_dir.clone();
    }
    if let Some(control) = &cli.access_control {
        config.access.control = control.clone();
    }
    if let Some(constraint) = &cli.access_constraint {
        config.access.constraint = constraint.clone();
    }
    if cli.debug {
        config.log.level = "debug".to_string();
    }
}

/// Resolve the configured backend selection, defaulting when unset.
fn resolve_backend(config: &KeywardenConfig) -> Result<Backend, KeywardenError> {
    match &config.store.backend {
        Some(name) => name.parse().map_err(|_| KeywardenError::UnknownBackend {
            name: name.clone(),
            available: Backend::VARIANTS.join(", "),
        }),
        None => Ok(Backend::default()),
    }
}

fn open_configured_store(config: &KeywardenConfig) -> Result<Box<dyn SecretStore>, KeywardenError> {
    let backend = resolve_backend(config)?;
    Ok(keywarden_store::open_backend(
        backend,
        &config.store.file_dir,
    )?)
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so `keywarden get` can pipe payload bytes through
/// stdout untouched.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "keywarden={log_level},keywarden_core={log_level},keywarden_store={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_copy_with_backends() {
        let cli = Cli::try_parse_from(["keywarden", "copy", "file", "memory"]).unwrap();
        match cli.command {
            Commands::Copy {
                source,
                destination,
                source_dir,
                destination_dir,
            } => {
                assert_eq!(source, Backend::File);
                assert_eq!(destination, Backend::Memory);
                assert!(source_dir.is_none());
                assert!(destination_dir.is_none());
            }
            other => panic!("expected copy, parsed {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_unknown_backend_name() {
        let err = Cli::try_parse_from(["keywarden", "copy", "keychain", "memory"]).unwrap_err();
        assert!(err.to_string().contains("must be one of"));
    }

    #[test]
    fn cli_accepts_global_flags_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "keywarden",
            "list",
            "--backend",
            "memory",
            "--json",
            "--debug",
        ])
        .unwrap();
        assert_eq!(cli.backend, Some(Backend::Memory));
        assert!(cli.debug);
        assert!(matches!(
            cli.command,
            Commands::List {
                json: true,
                plain: false
            }
        ));
    }

    #[test]
    fn cli_parses_namespace_positionals() {
        let cli = Cli::try_parse_from(["keywarden", "get", "oidc-token", "ci-robot"]).unwrap();
        match cli.command {
            Commands::Get { namespace, key } => {
                assert_eq!(namespace, SecretNamespace::OidcToken);
                assert_eq!(key, "ci-robot");
            }
            other => panic!("expected get, parsed {other:?}"),
        }
    }

    #[test]
    fn apply_overrides_beats_loaded_config() {
        let cli = Cli::try_parse_from([
            "keywarden",
            "--backend",
            "memory",
            "--file-dir",
            "/tmp/elsewhere",
            "--access-control",
            "UserPresenceAndWatch",
            "--access-constraint",
            "AccessibleWhenUnlocked",
            "--debug",
            "list",
        ])
        .unwrap();

        let mut config = KeywardenConfig::default();
        apply_overrides(&mut config, &cli);

        assert_eq!(config.store.backend.as_deref(), Some("memory"));
        assert_eq!(config.store.file_dir, "/tmp/elsewhere");
        assert_eq!(config.access.control, "UserPresenceAndWatch");
        assert_eq!(config.access.constraint, "AccessibleWhenUnlocked");
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn overrides_leave_untouched_fields_alone() {
        let cli = Cli::try_parse_from(["keywarden", "list"]).unwrap();
        let mut config = KeywardenConfig::default();
        let before_dir = config.store.file_dir.clone();
        apply_overrides(&mut config, &cli);

        assert!(config.store.backend.is_none());
        assert_eq!(config.store.file_dir, before_dir);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn resolve_backend_defaults_to_file() {
        let config = KeywardenConfig::default();
        assert_eq!(resolve_backend(&config).unwrap(), Backend::File);
    }

    #[test]
    fn resolve_backend_rejects_unknown_name() {
        let mut config = KeywardenConfig::default();
        config.store.backend = Some("keychain".to_string());
        let err = resolve_backend(&config).unwrap_err();
        assert!(matches!(err, KeywardenError::UnknownBackend { .. }));
        assert!(err.to_string().contains("file, memory"));
    }

    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed)
        let config = keywarden_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.access.control, "UserPresence");
    }
}
