// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `keywarden copy` command implementation.
//!
//! Opens the source and destination backends, runs the copy orchestration,
//! and prints per-namespace counts. An aborted run still prints how much
//! landed in the destination before the failure, then surfaces the failure
//! itself through main's error path.

use keywarden_config::model::KeywardenConfig;
use keywarden_core::{Backend, CopyReport, KeywardenError, copy_secrets};
use keywarden_store::open_backend;

/// Run the `keywarden copy` command.
///
/// `source_dir` and `destination_dir` override the configured file root
/// for their side of the copy, which is what makes file-to-file migrations
/// between two directories possible.
pub fn run_copy(
    config: &KeywardenConfig,
    source: Backend,
    destination: Backend,
    source_dir: Option<&str>,
    destination_dir: Option<&str>,
) -> Result<(), KeywardenError> {
    let source_dir = source_dir.unwrap_or(&config.store.file_dir);
    let destination_dir = destination_dir.unwrap_or(&config.store.file_dir);
    if source == destination && source_dir == destination_dir {
        return Err(KeywardenError::Config(format!(
            "source and destination are the same {source} store; \
             pass --source-dir or --destination-dir to separate them"
        )));
    }

    let source_store = open_backend(source, source_dir)?;
    let destination_store = open_backend(destination, destination_dir)?;

    println!("Copying secrets from {source} to {destination}");
    let report = copy_secrets(source_store.as_ref(), destination_store.as_ref());

    match report.failure {
        None => {
            println!("{}", summarize(&report));
            Ok(())
        }
        Some(failure) => {
            eprintln!(
                "Copy aborted after {} credentials, {} OIDC tokens, and {} sessions.",
                report.credentials, report.oidc_tokens, report.sessions
            );
            Err(failure.into())
        }
    }
}

/// One-line summary of a completed run.
fn summarize(report: &CopyReport) -> String {
    format!(
        "Copied {} credentials, {} OIDC tokens, and {} sessions.",
        report.credentials, report.oidc_tokens, report.sessions
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use keywarden_core::{SecretNamespace, SecretPayload, SecretStore};
    use keywarden_store::FileStore;
    use tempfile::tempdir;

    #[test]
    fn summarize_counts_every_namespace() {
        let report = CopyReport {
            credentials: 2,
            oidc_tokens: 1,
            sessions: 0,
            failure: None,
        };
        assert_eq!(
            summarize(&report),
            "Copied 2 credentials, 1 OIDC tokens, and 0 sessions."
        );
    }

    #[test]
    fn copying_a_store_onto_itself_is_rejected() {
        let config = KeywardenConfig::default();

        let err = run_copy(&config, Backend::File, Backend::File, None, None).unwrap_err();
        assert!(matches!(err, KeywardenError::Config(_)));
        assert!(err.to_string().contains("--source-dir"));

        let err = run_copy(&config, Backend::Memory, Backend::Memory, None, None).unwrap_err();
        assert!(matches!(err, KeywardenError::Config(_)));
    }

    #[test]
    fn run_copy_migrates_between_file_roots() {
        let source_root = tempdir().unwrap();
        let destination_root = tempdir().unwrap();

        let source = FileStore::open(source_root.path()).unwrap();
        source
            .set(
                SecretNamespace::Credential,
                "alice",
                SecretPayload::from(&b"a"[..]),
            )
            .unwrap();
        source
            .set(
                SecretNamespace::Session,
                "web",
                SecretPayload::from(&b"s"[..]),
            )
            .unwrap();

        let config = KeywardenConfig::default();
        run_copy(
            &config,
            Backend::File,
            Backend::File,
            Some(source_root.path().to_str().unwrap()),
            Some(destination_root.path().to_str().unwrap()),
        )
        .unwrap();

        let destination = FileStore::open(destination_root.path()).unwrap();
        assert_eq!(
            destination
                .get(SecretNamespace::Credential, "alice")
                .unwrap()
                .as_bytes(),
            b"a"
        );
        assert_eq!(
            destination
                .get(SecretNamespace::Session, "web")
                .unwrap()
                .as_bytes(),
            b"s"
        );
        assert!(
            destination
                .keys(SecretNamespace::OidcToken)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn run_copy_accepts_mixed_backends() {
        let source_root = tempdir().unwrap();
        let source = FileStore::open(source_root.path()).unwrap();
        source
            .set(
                SecretNamespace::OidcToken,
                "ci-robot",
                SecretPayload::from(&b"token"[..]),
            )
            .unwrap();

        let config = KeywardenConfig::default();
        run_copy(
            &config,
            Backend::File,
            Backend::Memory,
            Some(source_root.path().to_str().unwrap()),
            None,
        )
        .unwrap();

        // The source side must be untouched by the run.
        assert_eq!(
            source.keys(SecretNamespace::OidcToken).unwrap(),
            ["ci-robot".to_string()]
        );
    }
}
