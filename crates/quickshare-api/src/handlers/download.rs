//! Download handler

use axum::body::Body;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use quickshare_core::StorageError;
use tokio_util::io::ReaderStream;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /download/{filename}
/// Stream a shared file with a content type guessed from its extension
///
/// A name that does not even decode (e.g. invalid UTF-8) is just another
/// file that is not there.
pub async fn download_file(
    State(state): State<AppState>,
    filename: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(filename) = filename.map_err(|rejection| {
        tracing::debug!(%rejection, "Undecodable download name");
        ApiError::NotFound("File not found".to_string())
    })?;
    let path = state.shared_dir().resolve(&filename).await?;

    let file = tokio::fs::File::open(&path)
        .await
        .map_err(StorageError::from)?;
    let size = file.metadata().await.map_err(StorageError::from)?.len();
    let mime = mime_guess::from_path(&path).first_or_octet_stream();

    tracing::info!(file = %filename, size, content_type = %mime, "File downloaded");

    let headers = [
        (header::CONTENT_TYPE, mime.essence_str().to_string()),
        (header::CONTENT_LENGTH, size.to_string()),
    ];
    let body = Body::from_stream(ReaderStream::new(file));

    Ok((headers, body).into_response())
}
