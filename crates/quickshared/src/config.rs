//! TOML configuration for the QuickShare daemon
//!
//! Every key is optional; a missing file section falls back to the defaults
//! below.
//!
//! ```toml
//! port = 8000
//! bind_address = "0.0.0.0"
//! storage_dir = "uploads"
//! max_upload_bytes = 1073741824
//! show_qr = true
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::Context;
use quickshare_api::DEFAULT_MAX_UPLOAD_BYTES;
use serde::Deserialize;

/// Default listen port
pub const DEFAULT_PORT: u16 = 8000;

/// Default shared directory, relative to the working directory
pub const DEFAULT_STORAGE_DIR: &str = "uploads";

/// Top-level daemon configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Listen port, also used in the announced URL
    pub port: u16,
    /// Address the listener binds to (all interfaces by default)
    pub bind_address: IpAddr,
    /// Directory holding the shared files
    pub storage_dir: PathBuf,
    /// Largest accepted upload request body
    pub max_upload_bytes: usize,
    /// Print the URL as a QR code at startup
    pub show_qr: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            show_qr: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Socket address the HTTP listener binds to
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}
