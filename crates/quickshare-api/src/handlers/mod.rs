//! HTTP request handlers for the QuickShare API
//!
//! Each handler depends only on the shared directory held in [`crate::AppState`].

pub mod download;
pub mod index;
pub mod upload;
