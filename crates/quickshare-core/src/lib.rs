//! quickshare-core - Storage primitives for the QuickShare server
//!
//! This crate owns everything that touches the shared directory on disk:
//! creating it, listing the files it holds, turning client-supplied names into
//! safe file names, receiving uploads without exposing half-written files, and
//! resolving download requests without ever leaving the directory. It has no
//! knowledge of HTTP.

pub mod error;
pub mod sanitize;
pub mod storage;
pub mod upload;

pub use error::{StorageError, StorageResult};
pub use sanitize::{is_plain_file_name, sanitize_filename};
pub use storage::SharedDir;
pub use upload::{is_partial_upload, PendingUpload};
