//! quickshared - QuickShare Server Daemon
//!
//! Shares a directory over the local network: any device on the LAN can open
//! the announced URL (or scan the QR code) to upload files through a browser
//! form and download the files already shared.
//!
//! Usage:
//!   quickshared [OPTIONS]
//!
//! Run with `--help` for the option list.

use anyhow::Context;
use clap::Parser;
use quickshare_api::{create_router, AppState};
use quickshare_core::SharedDir;
use quickshared::announce::{announce, display_url, local_ip};
use quickshared::cli::Args;
use quickshared::config::ServerConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "quickshared=info,quickshare_api=info,quickshare_core=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = if let Some(ref path) = args.config_path {
        tracing::info!(config = %path.display(), "Loading config");
        ServerConfig::load(path)?
    } else {
        ServerConfig::default()
    };
    args.apply(&mut config);

    // The listener never starts without a usable shared directory
    let shared_dir = SharedDir::open(&config.storage_dir).with_context(|| {
        format!(
            "Cannot use shared directory '{}'",
            config.storage_dir.display()
        )
    })?;
    tracing::info!(path = %shared_dir.root().display(), "Sharing directory");

    let url = display_url(local_ip(), config.port);
    announce(&url, config.show_qr);

    let state = AppState::with_upload_limit(shared_dir, config.max_upload_bytes);
    let app = create_router(state);

    let addr = config.listen_addr();
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
