//! Filesystem module.
//!
//! Provides:
//! - Download root and link log resolution
//! - Per-account media paths
//! - Filename sanitizing

pub mod naming;
pub mod paths;

pub use naming::{sanitize_filename, sanitize_path_component};
pub use paths::{
    expand_home, expand_log_path, media_path, resolve_download_root, resolve_link_log,
};
