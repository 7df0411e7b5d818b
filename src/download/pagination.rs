//! Favorites pagination loop.

use std::sync::Arc;

use crate::api::FavoritesApi;
use crate::config::RunOptions;
use crate::download::cursor::Cursor;
use crate::download::fetcher::process_page;
use crate::download::quota::RequestQuota;
use crate::download::state::DownloadState;
use crate::download::unfavorite::LinkLog;
use crate::error::Result;
use crate::output::create_spinner;

/// Decides whether to fetch another page.
pub trait ContinueGate {
    /// Called after each page unless the run is unattended.
    fn should_continue(&mut self, cursor: &str) -> Result<bool>;
}

/// Page backward through the user's favorites until there are no older
/// ones, the gate says stop, or a fatal error occurs.
///
/// Each page's tasks are joined before the next page is requested. Page
/// fetch errors and cursor regressions end the run; per-item failures are
/// only counted in `state`.
pub async fn harvest_favorites(
    api: Arc<dyn FavoritesApi>,
    options: &RunOptions,
    gate: &mut dyn ContinueGate,
    state: &mut DownloadState,
) -> Result<()> {
    let link_log = Arc::new(LinkLog::new(options.link_log()));
    let mut quota = RequestQuota::new(options.quota_limit, options.quota_cooldown);
    let mut cursor = options.start_id.as_deref().map(Cursor::seeded);

    if let Some(cursor) = &cursor {
        tracing::info!("Starting from tweet ID: {}", cursor.id());
    }

    loop {
        let spinner = if quota.is_exhausted() {
            tracing::info!(
                "Last tweet ID: {}",
                state.last_cursor.as_deref().unwrap_or("-")
            );
            tracing::warn!(
                "API request quota exceeded, waiting {} minutes to unlock...",
                quota.cooldown().as_secs() / 60
            );
            options
                .show_progress
                .then(|| create_spinner("Waiting for the request quota to reset..."))
        } else {
            None
        };

        if quota.acquire().await {
            state.record_cooldown();
        }
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        let page = api.favorites_page(cursor.as_ref().map(Cursor::id)).await?;
        let page = match &cursor {
            Some(cursor) => cursor.trim_page(page),
            None => page,
        };

        let Some(oldest) = page.last().map(|t| t.id_str.clone()) else {
            tracing::info!("No older favorites, stopping");
            break;
        };

        // Validate ordering before acting on the page.
        let next = match &cursor {
            Some(cursor) => cursor.advance(&oldest)?,
            None => Cursor::after(oldest),
        };

        let report = process_page(&api, &page, options, &link_log).await;
        tracing::info!(
            "Page done: {} of {} tweets matched, {} files, {} un-favorited, {} failed",
            report.matched,
            report.posts,
            report.downloaded.len(),
            report.unfavorited.len(),
            report.failures.len()
        );
        state.record_page(&report);

        let reached = next.id().to_string();
        state.last_cursor = Some(reached.clone());
        cursor = Some(next);

        if !options.without_asking && !gate.should_continue(&reached)? {
            tracing::info!("Stopped at user request");
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Tweet;
    use crate::download::test_support::{tweet, FakeApi};
    use crate::error::Error;
    use crate::media::AccountFilter;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio_test::{assert_err, assert_ok};

    struct CountingGate {
        answers: Vec<bool>,
        asked: Vec<String>,
    }

    impl ContinueGate for CountingGate {
        fn should_continue(&mut self, cursor: &str) -> Result<bool> {
            self.asked.push(cursor.to_string());
            Ok(if self.answers.is_empty() {
                false
            } else {
                self.answers.remove(0)
            })
        }
    }

    fn always() -> CountingGate {
        CountingGate {
            answers: Vec::new(),
            asked: Vec::new(),
        }
    }

    fn options(root: &Path) -> RunOptions {
        RunOptions {
            download_root: root.to_path_buf(),
            filter: AccountFilter::default(),
            without_asking: true,
            unfavorite: false,
            log_path: Some(root.join("links.txt")),
            start_id: None,
            request_timeout: Duration::from_secs(5),
            quota_limit: 75,
            quota_cooldown: Duration::ZERO,
            show_progress: false,
        }
    }

    fn page(ids: &[&str]) -> Vec<Tweet> {
        ids.iter().map(|id| tweet(id, "alice", &[], &[])).collect()
    }

    async fn run(
        api: FakeApi,
        options: &RunOptions,
        gate: &mut CountingGate,
    ) -> (Arc<FakeApi>, DownloadState, Result<()>) {
        let api = Arc::new(api);
        let dyn_api: Arc<dyn FavoritesApi> = api.clone();
        let mut state = DownloadState::new(options.start_id.clone());
        let result = harvest_favorites(dyn_api, options, gate, &mut state).await;
        (api, state, result)
    }

    #[tokio::test]
    async fn test_pages_backward_until_exhausted() {
        let dir = TempDir::new().unwrap();
        let api = FakeApi::with_pages(vec![
            page(&["300", "290", "280"]),
            page(&["280", "270", "260"]),
            page(&["260"]),
        ]);

        let (api, state, result) = run(api, &options(dir.path()), &mut always()).await;

        assert_ok!(result);
        assert_eq!(
            api.page_requests(),
            vec![None, Some("280".to_string()), Some("260".to_string())]
        );
        assert_eq!(state.pages, 2);
        assert_eq!(state.posts_seen, 5);
        assert_eq!(state.last_cursor.as_deref(), Some("260"));
    }

    #[tokio::test]
    async fn test_empty_first_page_stops() {
        let dir = TempDir::new().unwrap();
        let (api, state, result) = run(
            FakeApi::with_pages(vec![Vec::new()]),
            &options(dir.path()),
            &mut always(),
        )
        .await;

        assert_ok!(result);
        assert_eq!(api.page_requests().len(), 1);
        assert_eq!(state.pages, 0);
        assert!(state.last_cursor.is_none());
    }

    #[tokio::test]
    async fn test_seeded_id_is_inclusive_then_stops_without_older() {
        let dir = TempDir::new().unwrap();
        let mut opts = options(dir.path());
        opts.start_id = Some("500".to_string());
        let api = FakeApi::with_pages(vec![page(&["500"]), page(&["500"])]);

        let (api, state, result) = run(api, &opts, &mut always()).await;

        assert_ok!(result);
        assert_eq!(
            api.page_requests(),
            vec![Some("500".to_string()), Some("500".to_string())]
        );
        assert_eq!(state.pages, 1);
        assert_eq!(state.posts_seen, 1);
        assert_eq!(state.last_cursor.as_deref(), Some("500"));
    }

    #[tokio::test]
    async fn test_cursor_regression_is_fatal() {
        let dir = TempDir::new().unwrap();
        let api = FakeApi::with_pages(vec![page(&["300", "200"]), page(&["900", "800"])]);

        let (api, state, result) = run(api, &options(dir.path()), &mut always()).await;

        let err = assert_err!(result);
        assert!(matches!(err, Error::CursorRegression { .. }));
        assert_eq!(state.pages, 1);
        assert_eq!(state.last_cursor.as_deref(), Some("200"));
        assert_eq!(api.page_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_regressing_page_is_not_processed() {
        let dir = TempDir::new().unwrap();
        let api = FakeApi::with_pages(vec![
            page(&["300"]),
            vec![tweet("900", "alice", &["late.jpg"], &[])],
        ]);

        let (api, _, result) = run(api, &options(dir.path()), &mut always()).await;

        assert!(result.is_err());
        assert!(api.media_requests().is_empty());
    }

    #[tokio::test]
    async fn test_page_fetch_error_aborts() {
        let dir = TempDir::new().unwrap();
        let api = FakeApi::with_pages(vec![page(&["300"])]);
        api.pages
            .lock()
            .unwrap()
            .push_back(Err(Error::Api("Failed to get favorites: HTTP 503".into())));

        let (_, state, result) = run(api, &options(dir.path()), &mut always()).await;

        assert!(matches!(result, Err(Error::Api(_))));
        assert_eq!(state.pages, 1);
    }

    #[tokio::test]
    async fn test_gate_asked_after_each_page() {
        let dir = TempDir::new().unwrap();
        let mut opts = options(dir.path());
        opts.without_asking = false;
        let api = FakeApi::with_pages(vec![page(&["300"]), page(&["200"]), page(&["100"])]);
        let mut gate = CountingGate {
            answers: vec![true, false],
            asked: Vec::new(),
        };

        let (api, state, result) = run(api, &opts, &mut gate).await;

        assert_ok!(result);
        assert_eq!(gate.asked, vec!["300".to_string(), "200".to_string()]);
        assert_eq!(state.pages, 2);
        assert_eq!(api.page_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_unattended_run_never_asks() {
        let dir = TempDir::new().unwrap();
        let api = FakeApi::with_pages(vec![page(&["300"]), page(&["200"])]);
        let mut gate = always();

        let (_, state, result) = run(api, &options(dir.path()), &mut gate).await;

        assert_ok!(result);
        assert!(gate.asked.is_empty());
        assert_eq!(state.pages, 2);
    }

    #[tokio::test]
    async fn test_quota_cooldown_between_pages() {
        let dir = TempDir::new().unwrap();
        let mut opts = options(dir.path());
        opts.quota_limit = 2;
        let api = FakeApi::with_pages(vec![
            page(&["500"]),
            page(&["400"]),
            page(&["300"]),
            page(&["200"]),
            page(&["100"]),
        ]);

        let (api, state, result) = run(api, &opts, &mut always()).await;

        assert_ok!(result);
        // Six requests (five pages plus the empty one) with a limit of two.
        assert_eq!(api.page_requests().len(), 6);
        assert_eq!(state.cooldowns, 2);
        assert_eq!(state.pages, 5);
    }

    #[tokio::test]
    async fn test_downloads_land_under_handle() {
        let dir = TempDir::new().unwrap();
        let mut opts = options(dir.path());
        opts.filter = AccountFilter::parse("alice");
        let api = FakeApi::with_pages(vec![vec![
            tweet("20", "alice", &["pic.jpg"], &[]),
            tweet("10", "bob", &["other.jpg"], &[]),
        ]]);

        let (_, state, result) = run(api, &opts, &mut always()).await;

        assert_ok!(result);
        assert_eq!(state.files_downloaded, 1);
        assert!(dir.path().join("alice").join("pic.jpg").exists());
        assert!(!dir.path().join("bob").exists());
    }
}
