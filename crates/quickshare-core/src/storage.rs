//! The shared directory
//!
//! A single flat directory holds every shared file. Nothing is cached: each
//! listing re-reads the directory and each download re-checks the file, so the
//! server always reflects what is on disk at the time of the request.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{StorageError, StorageResult};
use crate::sanitize::{is_plain_file_name, sanitize_filename};
use crate::upload::{is_partial_upload, PendingUpload};

/// Handle to the directory that stores all shared files
#[derive(Debug, Clone)]
pub struct SharedDir {
    /// Canonical path of the directory
    root: PathBuf,
}

impl SharedDir {
    /// Open the shared directory, creating it (non-recursively) if it does not
    /// exist yet.
    ///
    /// Fails if the directory cannot be created or if the path exists but is
    /// not a directory.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();

        match std::fs::metadata(path) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(StorageError::NotADirectory(path.to_path_buf())),
            Err(e) if e.kind() == ErrorKind::NotFound => match std::fs::create_dir(path) {
                Ok(()) => tracing::info!(path = %path.display(), "Created shared directory"),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
                Err(e) => return Err(e.into()),
            },
            Err(e) => return Err(e.into()),
        }

        let root = std::fs::canonicalize(path)?;
        Ok(Self { root })
    }

    /// Canonical path of the directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of all regular files in the directory, in enumeration order.
    ///
    /// Subdirectories, symlinks, other special entries, uploads still in
    /// progress and names that are not valid UTF-8 are skipped.
    pub async fn list(&self) -> StorageResult<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) if is_partial_upload(&name) => {}
                Ok(name) => names.push(name),
                Err(raw) => tracing::debug!(?raw, "Skipping file with non UTF-8 name"),
            }
        }

        Ok(names)
    }

    /// Resolve a requested file name to the path of a regular file inside the
    /// directory.
    ///
    /// The name is used verbatim (never sanitized) and must be a single plain
    /// path component. Anything else, including traversal attempts, is
    /// reported as [`StorageError::NotFound`] so that callers cannot tell a
    /// rejected name from a missing file.
    pub async fn resolve(&self, name: &str) -> StorageResult<PathBuf> {
        if !is_plain_file_name(name) || is_partial_upload(name) {
            tracing::debug!(name, "Rejected file name outside shared directory");
            return Err(StorageError::NotFound(name.to_string()));
        }

        let path = self.root.join(name);
        let meta = match tokio::fs::symlink_metadata(&path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        // Symlinks are never followed, so the path cannot point out of root
        if !meta.file_type().is_file() {
            return Err(StorageError::NotFound(name.to_string()));
        }

        Ok(path)
    }

    /// Start receiving a file to be stored under the sanitized form of
    /// `client_name`.
    ///
    /// Content goes to a hidden partial file in the directory and only
    /// replaces an existing file of the same name on
    /// [`PendingUpload::commit`]. Concurrent uploads of the same name race;
    /// the last commit wins.
    pub async fn begin_upload(&self, client_name: &str) -> StorageResult<PendingUpload> {
        let name = sanitize_filename(client_name)
            .ok_or_else(|| StorageError::InvalidName(client_name.to_string()))?;
        let target = self.root.join(&name);

        match tokio::fs::symlink_metadata(&target).await {
            Ok(meta) if !meta.file_type().is_file() => return Err(StorageError::NotAFile(name)),
            Ok(_) => tracing::debug!(file = %name, "Upload will replace existing file"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        PendingUpload::create(&self.root, name).await
    }
}
