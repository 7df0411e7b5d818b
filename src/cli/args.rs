//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{parse_tweet_id, RunOptions};
use crate::error::Result;

/// Favorited-tweet media downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "twitter-favorite-pics",
    version,
    about = "Download the images of your favorited tweets",
    long_about = "Pages backward through your favorited tweets and saves attached images\n\
                  under <download path>/twitter-favorite-pics/<screen name>/.\n\n\
                  Optionally un-favorites each processed tweet."
)]
pub struct Args {
    /// Get media with an ID less than (that is, older than) or equal to the specified ID.
    #[arg(short = 'i', long = "tweetid")]
    pub tweet_id: Option<String>,

    /// Path to the settings file.
    #[arg(short, long, env = "TWITTER_FAVORITE_PICS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base directory for downloads (overrides DownloadPath).
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// Keep paging without asking after each page.
    #[arg(short = 'y', long = "yes")]
    pub without_asking: bool,

    /// Un-favorite each tweet after processing it.
    #[arg(long)]
    pub unfav: bool,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Hide progress bars.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into run options, overriding where specified.
    pub fn merge_into_options(&self, options: &mut RunOptions) -> Result<()> {
        if let Some(id) = &self.tweet_id {
            options.start_id = Some(parse_tweet_id(id)?);
        }

        if let Some(dir) = &self.download_directory {
            options.download_root = dir.join(crate::config::APP_NAME);
        }

        // Boolean flags (only override if set to non-default)
        if self.without_asking {
            options.without_asking = true;
        }

        if self.unfav {
            options.unfavorite = true;
        }

        if let Some(secs) = self.timeout {
            options.request_timeout = crate::config::parse_timeout(&secs.to_string())?;
        }

        if self.quiet {
            options.show_progress = false;
        }

        Ok(())
    }
}
