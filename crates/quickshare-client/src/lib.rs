//! QuickShare Client Library
//!
//! Typed HTTP client for a running QuickShare server.
//!
//! # Example
//!
//! ```rust,no_run
//! use quickshare_client::ShareClient;
//!
//! #[tokio::main]
//! async fn main() -> quickshare_client::Result<()> {
//!     let client = ShareClient::new("http://192.168.1.20:8000")?;
//!
//!     client.upload("notes.txt", b"hello".to_vec()).await?;
//!     let files = client.list_files().await?;
//!     let body = client.download("notes.txt").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module starts a router on an ephemeral port:
//!
//! ```rust,ignore
//! use quickshare_client::testing::TestServer;
//! use quickshare_api::{create_router, AppState};
//!
//! let server = TestServer::start(create_router(state)).await?;
//! let files = server.client.list_files().await?;
//! ```

mod client;
mod error;
pub mod testing;

pub use client::ShareClient;
pub use error::{Result, ShareClientError};
