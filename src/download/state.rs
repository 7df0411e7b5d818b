//! Run-wide download state.

use crate::download::report::PageReport;

/// Counters accumulated across all pages of one run.
#[derive(Debug, Default)]
pub struct DownloadState {
    /// Oldest tweet id reached so far.
    pub last_cursor: Option<String>,

    // Statistics
    pub pages: u64,
    pub posts_seen: u64,
    pub posts_matched: u64,
    pub files_downloaded: u64,
    pub tweets_unfavorited: u64,
    pub links_logged: u64,
    pub failures: u64,
    pub cooldowns: u64,
}

impl DownloadState {
    /// Create state for a run starting at `start_id` (if any).
    pub fn new(start_id: Option<String>) -> Self {
        Self {
            last_cursor: start_id,
            ..Default::default()
        }
    }

    /// Fold a finished page into the totals.
    pub fn record_page(&mut self, report: &PageReport) {
        self.pages += 1;
        self.posts_seen += report.posts as u64;
        self.posts_matched += report.matched as u64;
        self.files_downloaded += report.downloaded.len() as u64;
        self.tweets_unfavorited += report.unfavorited.len() as u64;
        self.links_logged += report.links_logged as u64;
        self.failures += report.failures.len() as u64;
    }

    pub fn record_cooldown(&mut self) {
        self.cooldowns += 1;
    }
}
