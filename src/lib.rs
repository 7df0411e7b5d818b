//! Favorite Media Harvester - download the images of your favorited tweets
//!
//! Pages backward through the authenticated user's favorites, saving the
//! attached images of each tweet under `<root>/<screen name>/` and
//! optionally un-favoriting what it processed.
//!
//! # Features
//!
//! - OAuth1 request signing and the PIN-based authorization handshake
//! - Quota-aware favorites pagination with a monotonic `max_id` cursor
//! - Concurrent per-page downloads, joined before the next page
//! - Un-favoriting, with the links of media-less tweets kept in a log
//! - Optional screen name filter
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use favorite_media_harvester::{
//!     harvest_favorites, ContinueGate, DownloadState, FavoritesApi, RunOptions, Settings,
//!     TwitterApi,
//! };
//!
//! struct Always;
//!
//! impl ContinueGate for Always {
//!     fn should_continue(&mut self, _cursor: &str) -> favorite_media_harvester::Result<bool> {
//!         Ok(true)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::load(Path::new("settings.json"))?.expect("settings");
//!     let options = RunOptions::from_settings(&settings)?;
//!     let token = settings.access_token_pair().expect("authorized");
//!     let api: Arc<dyn FavoritesApi> =
//!         Arc::new(TwitterApi::new(settings.consumer(), token, options.request_timeout)?);
//!
//!     let mut state = DownloadState::new(None);
//!     harvest_favorites(api, &options, &mut Always, &mut state).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::{FavoritesApi, TwitterApi};
pub use config::{RunOptions, Settings};
pub use download::{harvest_favorites, ContinueGate, DownloadState};
pub use error::{Error, Result};
pub use media::{AccountFilter, MediaAttachment};
