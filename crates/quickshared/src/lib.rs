//! quickshared - QuickShare daemon support code
//!
//! Configuration, command-line parsing and the startup announcement (LAN
//! address discovery plus a terminal QR code of the server URL). The HTTP
//! surface itself lives in `quickshare-api`.

pub mod announce;
pub mod cli;
pub mod config;
