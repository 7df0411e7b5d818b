//! Un-favorite dispatch and the link log.

use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::api::types::Tweet;
use crate::api::FavoritesApi;
use crate::error::Result;
use crate::media::extract_links;

/// Append-only file of links, shared by concurrent tasks.
#[derive(Debug)]
pub struct LinkLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LinkLog {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one link per line. Appends from different tasks never interleave.
    pub async fn append(&self, links: &[String]) -> Result<()> {
        if links.is_empty() {
            return Ok(());
        }

        let _guard = self.lock.lock().await;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        let mut block = links.join("\n");
        block.push('\n');
        file.write_all(block.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}

/// A pending un-favorite for one tweet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnfavoriteJob {
    pub tweet_id: String,
    /// Links to preserve before removal; only set for tweets without media.
    pub links: Vec<String>,
}

impl UnfavoriteJob {
    pub fn for_tweet(tweet: &Tweet, attachment_count: usize) -> Self {
        let links = if attachment_count == 0 {
            extract_links(tweet)
        } else {
            Vec::new()
        };

        Self {
            tweet_id: tweet.id_str.clone(),
            links,
        }
    }
}

/// Log the job's links, then remove the tweet from favorites.
///
/// Returns the number of links logged. If logging fails the tweet stays
/// favorited.
pub async fn dispatch_unfavorite(
    api: &dyn FavoritesApi,
    job: &UnfavoriteJob,
    link_log: &LinkLog,
) -> Result<usize> {
    link_log.append(&job.links).await?;
    api.unfavorite(&job.tweet_id).await?;

    tracing::info!("Un-favorited tweet {}", job.tweet_id);
    Ok(job.links.len())
}
