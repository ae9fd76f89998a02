//! quickshare-api - HTTP layer of the QuickShare server
//!
//! Three routes over a single shared directory: an index page with an upload
//! form and the file list, a multipart upload endpoint, and a download
//! endpoint. The storage root is injected through [`AppState`].
//!
//! # Usage
//!
//! ```ignore
//! use quickshare_api::{create_router, AppState};
//! use quickshare_core::SharedDir;
//!
//! let state = AppState::new(SharedDir::open("uploads")?);
//! let router = create_router(state);
//! ```

pub mod error;
pub mod handlers;
pub mod page;
pub mod state;

pub use error::ApiError;
pub use page::{render_index, IndexView};
pub use state::{AppState, DEFAULT_MAX_UPLOAD_BYTES};

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the QuickShare router with the given application state
pub fn create_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes());

    Router::new()
        // Health check
        .route("/health", get(|| async { "OK" }))
        .route("/", get(handlers::index::index))
        .route(
            "/upload",
            post(handlers::upload::upload_file).layer(upload_limit),
        )
        .route("/download/{filename}", get(handlers::download::download_file))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
