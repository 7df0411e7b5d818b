//! Per-page media fetching: filter, fan out, join.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::distributions::Alphanumeric;
use rand::Rng;
use tokio::task::JoinSet;

use crate::api::types::Tweet;
use crate::api::FavoritesApi;
use crate::config::RunOptions;
use crate::download::report::{PageReport, TaskFailure, TaskKind, TaskOutcome};
use crate::download::unfavorite::{dispatch_unfavorite, LinkLog, UnfavoriteJob};
use crate::error::{Error, Result};
use crate::fs::media_path;
use crate::media::{extract_attachments, MediaAttachment};
use crate::output::create_item_bar;

type TaskResult = std::result::Result<TaskOutcome, TaskFailure>;

/// Length of the random tag in temporary file names.
const PART_TAG_LENGTH: usize = 8;

/// Download one attachment to `<root>/<handle>/<file_name>`.
///
/// The body is written to a uniquely named `.part` file first and renamed
/// over the target, so an existing file is either replaced whole or left
/// untouched.
pub async fn download_attachment(
    api: &dyn FavoritesApi,
    root: &Path,
    handle: &str,
    item: &MediaAttachment,
) -> Result<PathBuf> {
    let target = media_path(root, handle, &item.file_name)?;
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    tracing::debug!("Get {}", item.large_url());
    let bytes = api.fetch_media(&item.large_url()).await?;

    let partial = part_path(&target);
    if let Err(e) = tokio::fs::write(&partial, &bytes).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(e.into());
    }
    if let Err(e) = tokio::fs::rename(&partial, &target).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(e.into());
    }

    tracing::info!("Downloaded: {}", target.display());
    Ok(target)
}

/// `<target>.<random>.part`
fn part_path(target: &Path) -> PathBuf {
    let tag: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(PART_TAG_LENGTH)
        .map(char::from)
        .collect();

    let mut partial = target.as_os_str().to_os_string();
    partial.push(format!(".{}.part", tag));
    PathBuf::from(partial)
}

/// Process one page of favorites.
///
/// Downloads run first, one task per distinct target file. Once they are
/// all joined, tweets whose media all landed on disk (or that had none) are
/// un-favorited, again one task each. This returns only after every task
/// finished. Failures are collected in the report and never stop sibling
/// tasks.
pub async fn process_page(
    api: &Arc<dyn FavoritesApi>,
    page: &[Tweet],
    options: &RunOptions,
    link_log: &Arc<LinkLog>,
) -> PageReport {
    let mut report = PageReport {
        posts: page.len(),
        ..Default::default()
    };
    let root = Arc::new(options.download_root.clone());

    let mut downloads: JoinSet<(PathBuf, TaskResult)> = JoinSet::new();
    // Tweets behind each target; a file shared on the page is fetched once.
    let mut owners: HashMap<PathBuf, Vec<String>> = HashMap::new();
    let mut incomplete: HashSet<String> = HashSet::new();
    let mut jobs = Vec::new();

    for tweet in page {
        let handle = tweet.handle();
        if !options.filter.matches(handle) {
            tracing::debug!("Skipping tweet {} by {} (filtered)", tweet.id_str, handle);
            continue;
        }
        report.matched += 1;

        let attachments = extract_attachments(tweet);
        tracing::info!(
            "ScreenName: {}, Tweet ID: {}, Num of media: {}",
            handle,
            tweet.id_str,
            attachments.len()
        );

        for item in &attachments {
            let target = match media_path(&root, handle, &item.file_name) {
                Ok(target) => target,
                Err(error) => {
                    incomplete.insert(tweet.id_str.clone());
                    report.record(Err(TaskFailure {
                        kind: TaskKind::Download,
                        tweet_id: Some(tweet.id_str.clone()),
                        error,
                    }));
                    continue;
                }
            };

            let tweets = owners.entry(target.clone()).or_default();
            tweets.push(tweet.id_str.clone());
            if tweets.len() > 1 {
                tracing::debug!("{} already queued on this page", target.display());
                continue;
            }

            let api = Arc::clone(api);
            let root = Arc::clone(&root);
            let handle = handle.to_string();
            let tweet_id = tweet.id_str.clone();
            let item = item.clone();

            downloads.spawn(async move {
                let result = download_attachment(api.as_ref(), &root, &handle, &item)
                    .await
                    .map(TaskOutcome::Downloaded)
                    .map_err(|error| TaskFailure {
                        kind: TaskKind::Download,
                        tweet_id: Some(tweet_id),
                        error,
                    });
                (target, result)
            });
        }

        if options.unfavorite {
            let job = UnfavoriteJob::for_tweet(tweet, attachments.len());
            jobs.push((job, !attachments.is_empty()));
        }
    }

    let progress = (options.show_progress && !(downloads.is_empty() && jobs.is_empty()))
        .then(|| create_item_bar((downloads.len() + jobs.len()) as u64, "Page"));

    let mut aborted = false;
    while let Some(joined) = downloads.join_next().await {
        match joined {
            Ok((target, result)) => {
                if result.is_err() {
                    if let Some(tweets) = owners.get(&target) {
                        incomplete.extend(tweets.iter().cloned());
                    }
                }
                report.record(result);
            }
            Err(e) => {
                aborted = true;
                report.record(Err(aborted_task(e)));
            }
        }
        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }

    let mut removals: JoinSet<TaskResult> = JoinSet::new();
    for (job, has_media) in jobs {
        // An aborted task cannot be traced back to its tweets.
        if incomplete.contains(&job.tweet_id) || (aborted && has_media) {
            tracing::warn!(
                "Keeping tweet {} favorited: not all of its media was saved",
                job.tweet_id
            );
            if let Some(bar) = &progress {
                bar.inc(1);
            }
            continue;
        }

        let api = Arc::clone(api);
        let link_log = Arc::clone(link_log);

        removals.spawn(async move {
            match dispatch_unfavorite(api.as_ref(), &job, &link_log).await {
                Ok(links_logged) => Ok(TaskOutcome::Unfavorited {
                    tweet_id: job.tweet_id,
                    links_logged,
                }),
                Err(error) => Err(TaskFailure {
                    kind: TaskKind::Unfavorite,
                    tweet_id: Some(job.tweet_id),
                    error,
                }),
            }
        });
    }

    while let Some(joined) = removals.join_next().await {
        match joined {
            Ok(result) => report.record(result),
            Err(e) => report.record(Err(aborted_task(e))),
        }
        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    report
}

fn aborted_task(e: tokio::task::JoinError) -> TaskFailure {
    TaskFailure {
        kind: TaskKind::Aborted,
        tweet_id: None,
        error: Error::Download(format!("Task did not complete: {}", e)),
    }
}
