//! In-process server for integration tests
//!
//! Serves a router on an ephemeral loopback port and hands out a
//! [`ShareClient`] pointed at it. The server stops when the value is dropped.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::{Result, ShareClient};

/// A QuickShare router running on `127.0.0.1:<random port>`
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: ShareClient,
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl TestServer {
    /// Serve `router` until the returned value is dropped
    ///
    /// ```ignore
    /// let server = TestServer::start(create_router(AppState::new(shared_dir))).await?;
    /// server.client.upload("f.txt", b"X".to_vec()).await?;
    /// ```
    pub async fn start(router: axum::Router) -> Result<Self> {
        // Bound before spawning, so requests queue instead of being refused
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (stop, stopped) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let served = axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = stopped.await;
                })
                .await;
            if let Err(e) = served {
                tracing::warn!(error = %e, "Test server stopped with error");
            }
        });

        Ok(Self {
            client: ShareClient::new(&format!("http://{}", addr))?,
            addr,
            stop: Some(stop),
            task,
        })
    }

    /// Absolute URL for a raw, already-encoded request path
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        self.task.abort();
    }
}
