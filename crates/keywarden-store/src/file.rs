// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flat-file secret store.
//!
//! Layout is one file per secret: `<root>/<namespace>/<encoded-key>.secret`,
//! where the key is unpadded URL-safe base64. Encoding the key means any
//! string, including ones with path separators, stays inside its namespace
//! directory. Writes go to a temporary file in the same directory and are
//! renamed into place, so a reader never observes a half-written secret.

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use tracing::debug;

use keywarden_core::{SecretNamespace, SecretPayload, SecretStore, StoreError};

const SECRET_EXTENSION: &str = "secret";

/// Secret store backed by a directory tree on the local filesystem.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|err| {
            StoreError::backend_with(format!("failed to create {}", root.display()), err)
        })?;
        restrict_permissions(&root, 0o700)?;
        debug!(root = %root.display(), "opened file store");
        Ok(FileStore { root })
    }

    /// Root directory this store reads and writes under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn namespace_dir(&self, namespace: SecretNamespace) -> PathBuf {
        self.root.join(namespace.to_string())
    }

    fn entry_path(&self, namespace: SecretNamespace, key: &str) -> PathBuf {
        let encoded = URL_SAFE_NO_PAD.encode(key.as_bytes());
        self.namespace_dir(namespace)
            .join(format!("{encoded}.{SECRET_EXTENSION}"))
    }
}

impl SecretStore for FileStore {
    fn keys(&self, namespace: SecretNamespace) -> Result<Vec<String>, StoreError> {
        let dir = self.namespace_dir(namespace);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            // A namespace nothing was ever written to has no directory.
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(StoreError::backend_with(
                    format!("failed to list {}", dir.display()),
                    err,
                ));
            }
        };

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| {
                StoreError::backend_with(format!("failed to list {}", dir.display()), err)
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SECRET_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            keys.push(decode_key(stem)?);
        }
        keys.sort();
        Ok(keys)
    }

    fn get(&self, namespace: SecretNamespace, key: &str) -> Result<SecretPayload, StoreError> {
        let path = self.entry_path(namespace, key);
        match fs::read(&path) {
            Ok(bytes) => Ok(SecretPayload::new(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound {
                key: key.to_string(),
            }),
            Err(err) => Err(StoreError::backend_with(
                format!("failed to read {}", path.display()),
                err,
            )),
        }
    }

    fn set(
        &self,
        namespace: SecretNamespace,
        key: &str,
        payload: SecretPayload,
    ) -> Result<(), StoreError> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey {
                key: key.to_string(),
                reason: "key must not be empty".to_string(),
            });
        }

        let dir = self.namespace_dir(namespace);
        fs::create_dir_all(&dir).map_err(|err| {
            StoreError::backend_with(format!("failed to create {}", dir.display()), err)
        })?;
        restrict_permissions(&dir, 0o700)?;

        let path = self.entry_path(namespace, key);
        let tmp = path.with_extension("tmp");
        if let Err(err) = write_entry(&tmp, payload.as_bytes()) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::backend_with(
                format!("failed to write {}", tmp.display()),
                err,
            ));
        }
        restrict_permissions(&tmp, 0o600)?;
        fs::rename(&tmp, &path).map_err(|err| {
            let _ = fs::remove_file(&tmp);
            StoreError::backend_with(format!("failed to write {}", path.display()), err)
        })?;
        debug!(namespace = %namespace, path = %path.display(), "secret written");
        Ok(())
    }
}

fn write_entry(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn decode_key(stem: &str) -> Result<String, StoreError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(stem)
        .map_err(|err| StoreError::backend_with(format!("corrupt entry name `{stem}`"), err))?;
    String::from_utf8(bytes)
        .map_err(|err| StoreError::backend_with(format!("corrupt entry name `{stem}`"), err))
}

/// Secrets are private to the owning user: 0700 directories, 0600 files.
#[cfg(unix)]
fn restrict_permissions(path: &Path, mode: u32) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|err| {
        StoreError::backend_with(format!("failed to restrict {}", path.display()), err)
    })
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path, _mode: u32) -> Result<(), StoreError> {
    Ok(())
}
