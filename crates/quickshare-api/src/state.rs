//! Application state for the QuickShare API

use std::sync::Arc;

use quickshare_core::SharedDir;

/// Default upper bound for a single upload request body (1 GiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 1024 * 1024 * 1024;

/// Application state shared across all handlers
///
/// Immutable after construction; handlers only ever read from it.
#[derive(Clone)]
pub struct AppState {
    /// Directory holding every shared file
    shared_dir: Arc<SharedDir>,
    /// Request body limit applied to uploads
    max_upload_bytes: usize,
}

impl AppState {
    /// Create a new AppState with the default upload limit
    pub fn new(shared_dir: SharedDir) -> Self {
        Self::with_upload_limit(shared_dir, DEFAULT_MAX_UPLOAD_BYTES)
    }

    /// Create a new AppState with a custom upload limit
    pub fn with_upload_limit(shared_dir: SharedDir, max_upload_bytes: usize) -> Self {
        Self {
            shared_dir: Arc::new(shared_dir),
            max_upload_bytes,
        }
    }

    /// Get the shared directory
    pub fn shared_dir(&self) -> &SharedDir {
        &self.shared_dir
    }

    /// Maximum accepted upload body size in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}
