//! Index page handler

use axum::extract::State;
use axum::response::Html;

use crate::error::ApiError;
use crate::page::{render_index, IndexView};
use crate::state::AppState;

/// GET /
/// Upload form and the list of shared files
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let files = state.shared_dir().list().await?;
    tracing::debug!(count = files.len(), "Listing shared files");

    Ok(Html(render_index(&IndexView::new(files))))
}
