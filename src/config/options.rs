//! Run options: the explicit configuration handed to the harvesting loop.

use std::path::PathBuf;
use std::time::Duration;

use crate::api::DEFAULT_REQUEST_TIMEOUT;
use crate::config::settings::Settings;
use crate::config::validation::parse_timeout;
use crate::download::quota::{API_REQUEST_LIMIT, QUOTA_COOLDOWN};
use crate::error::Result;
use crate::fs::{expand_log_path, resolve_download_root, resolve_link_log};
use crate::media::AccountFilter;

/// Everything the pagination loop and its tasks need, built once per run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Root folder; media lands in `<root>/<handle>/<file>`.
    pub download_root: PathBuf,

    pub filter: AccountFilter,

    /// Skip the "continue?" prompt between pages.
    pub without_asking: bool,

    /// Un-favorite every processed tweet.
    pub unfavorite: bool,

    /// Explicit link log location (`LogPath`). `None` keeps the log inside
    /// `download_root`, wherever that ends up.
    pub log_path: Option<PathBuf>,

    /// Tweet id to start from (inclusive). `None` starts at the newest page.
    pub start_id: Option<String>,

    pub request_timeout: Duration,

    /// Page requests allowed before a cooldown.
    pub quota_limit: u32,

    pub quota_cooldown: Duration,

    /// Draw progress bars.
    pub show_progress: bool,
}

impl RunOptions {
    /// Build run options from persisted settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let download_root = resolve_download_root(settings.download_path.as_deref())?;
        let log_path = expand_log_path(settings.log_path.as_deref())?;

        let request_timeout = match &settings.request_timeout_secs {
            Some(secs) => parse_timeout(secs)?,
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        Ok(Self {
            download_root,
            filter: AccountFilter::parse(&settings.filter_account),
            without_asking: settings.download_without_asking,
            unfavorite: settings.un_fav_after_download,
            log_path,
            start_id: None,
            request_timeout,
            quota_limit: API_REQUEST_LIMIT,
            quota_cooldown: QUOTA_COOLDOWN,
            show_progress: true,
        })
    }

    /// Append-only log of links from media-less un-favorited tweets.
    pub fn link_log(&self) -> PathBuf {
        resolve_link_log(self.log_path.as_deref(), &self.download_root)
    }
}
