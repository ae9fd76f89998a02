//! Upload handler

use axum::extract::{Multipart, State};
use axum::response::Redirect;

use crate::error::ApiError;
use crate::state::AppState;

/// Multipart field carrying the uploaded file
pub const FILE_FIELD: &str = "file";

/// POST /upload
/// Store the file from the `file` form field and go back to the index page
///
/// Only the first `file` field is used. A part without a filename is a plain
/// form value, not a file, and is ignored like any other field.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, ApiError> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        if file_name.is_empty() {
            return Err(ApiError::BadRequest("No file selected".to_string()));
        }

        // Streamed into a partial file; dropped (and removed) on any error
        let mut upload = state.shared_dir().begin_upload(&file_name).await?;
        while let Some(chunk) = field.chunk().await? {
            upload.write(&chunk).await?;
        }
        let size = upload.written();
        let stored = upload.commit().await?;

        tracing::info!(
            file = %stored,
            client_name = %file_name,
            size,
            "File uploaded"
        );

        return Ok(Redirect::to("/"));
    }

    Err(ApiError::BadRequest("No file part in request".to_string()))
}
