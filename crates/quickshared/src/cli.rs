//! Command-line arguments
//!
//! Flags override values from the config file.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::config::ServerConfig;

#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "quickshared", version)]
#[command(about = "Share files over the local network from a browser")]
pub struct Args {
    /// Server config file (TOML format)
    #[arg(short = 'f', long = "config", value_name = "PATH")]
    pub config_path: Option<PathBuf>,

    /// Listen port [default: 8000]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Shared directory, created if missing [default: uploads]
    #[arg(short = 'd', long = "dir", value_name = "PATH")]
    pub storage_dir: Option<PathBuf>,

    /// Address to bind [default: 0.0.0.0]
    #[arg(short = 'b', long = "bind", value_name = "IP")]
    pub bind_address: Option<IpAddr>,

    /// Do not print the QR code at startup
    #[arg(long)]
    pub no_qr: bool,
}

impl Args {
    /// Apply the flags that were given on top of `config`
    pub fn apply(&self, config: &mut ServerConfig) {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(ref dir) = self.storage_dir {
            config.storage_dir = dir.clone();
        }
        if let Some(addr) = self.bind_address {
            config.bind_address = addr;
        }
        if self.no_qr {
            config.show_qr = false;
        }
    }
}
