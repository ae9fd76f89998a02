//! Uploads in progress
//!
//! An upload is written chunk by chunk to a hidden partial file inside the
//! shared directory and renamed onto its final name only once every byte has
//! arrived. A failed or abandoned upload never touches the existing file; its
//! partial file is removed when the [`PendingUpload`] is dropped.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::StorageResult;

const PARTIAL_PREFIX: &str = ".upload-";
const PARTIAL_SUFFIX: &str = ".part";

/// Whether `name` is the partial file of an upload still being received
pub fn is_partial_upload(name: &str) -> bool {
    name.starts_with(PARTIAL_PREFIX) && name.ends_with(PARTIAL_SUFFIX)
}

/// A file being received into the shared directory
#[derive(Debug)]
pub struct PendingUpload {
    /// Sanitized final name
    name: String,
    partial_path: PathBuf,
    target_path: PathBuf,
    file: Option<File>,
    written: u64,
    committed: bool,
}

impl PendingUpload {
    pub(crate) async fn create(root: &Path, name: String) -> StorageResult<Self> {
        let partial_path = root.join(format!(
            "{}{}{}",
            PARTIAL_PREFIX,
            Uuid::new_v4().simple(),
            PARTIAL_SUFFIX
        ));
        let file = File::create(&partial_path).await?;

        Ok(Self {
            target_path: root.join(&name),
            name,
            partial_path,
            file: Some(file),
            written: 0,
            committed: false,
        })
    }

    /// Name the file will be stored under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bytes received so far
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Append a chunk of content
    pub async fn write(&mut self, chunk: &[u8]) -> StorageResult<()> {
        if let Some(file) = self.file.as_mut() {
            file.write_all(chunk).await?;
            self.written += chunk.len() as u64;
        }
        Ok(())
    }

    /// Flush the content and move it onto the final name, replacing any
    /// previous file. Returns the stored name.
    pub async fn commit(mut self) -> StorageResult<String> {
        if let Some(mut file) = self.file.take() {
            file.flush().await?;
            file.sync_all().await?;
        }

        tokio::fs::rename(&self.partial_path, &self.target_path).await?;
        self.committed = true;

        Ok(self.name.clone())
    }
}

impl Drop for PendingUpload {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        // Close the handle before unlinking
        self.file.take();
        match std::fs::remove_file(&self.partial_path) {
            Ok(()) => tracing::debug!(
                file = %self.name,
                written = self.written,
                "Discarded unfinished upload"
            ),
            Err(e) => tracing::warn!(
                path = %self.partial_path.display(),
                error = %e,
                "Failed to remove partial upload"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_upload_names() {
        assert!(is_partial_upload(".upload-0123abcd.part"));
        assert!(!is_partial_upload("upload-0123abcd.part"));
        assert!(!is_partial_upload(".upload-0123abcd.txt"));
        assert!(!is_partial_upload("notes.part"));
    }
}
