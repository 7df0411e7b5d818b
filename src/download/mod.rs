//! Download module for favorites harvesting.
//!
//! This module provides:
//! - The paging cursor and request quota
//! - The pagination loop
//! - Per-page media fetching and un-favorite dispatch
//! - Page reports and run-wide state

pub mod cursor;
pub mod fetcher;
pub mod pagination;
pub mod quota;
pub mod report;
pub mod state;
pub mod unfavorite;

#[cfg(test)]
mod test_support;

pub use cursor::{compare_ids, Cursor};
pub use fetcher::{download_attachment, process_page};
pub use pagination::{harvest_favorites, ContinueGate};
pub use quota::{RequestQuota, API_REQUEST_LIMIT, QUOTA_COOLDOWN};
pub use report::{PageReport, TaskFailure, TaskKind};
pub use state::DownloadState;
pub use unfavorite::{dispatch_unfavorite, LinkLog, UnfavoriteJob};
