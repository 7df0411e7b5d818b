//! Results of one page's task group.

use std::fmt;
use std::path::PathBuf;

use crate::error::Error;

/// What a spawned task was doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Download,
    Unfavorite,
    /// The task panicked or was cancelled before reporting.
    Aborted,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Download => write!(f, "download"),
            TaskKind::Unfavorite => write!(f, "un-favorite"),
            TaskKind::Aborted => write!(f, "aborted task"),
        }
    }
}

/// A per-item failure. Recorded and logged, never fatal.
#[derive(Debug)]
pub struct TaskFailure {
    pub kind: TaskKind,
    pub tweet_id: Option<String>,
    pub error: Error,
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tweet_id {
            Some(id) => write!(f, "{} for tweet {}: {}", self.kind, id, self.error),
            None => write!(f, "{}: {}", self.kind, self.error),
        }
    }
}

/// Successful task result.
#[derive(Debug)]
pub enum TaskOutcome {
    Downloaded(PathBuf),
    Unfavorited { tweet_id: String, links_logged: usize },
}

/// Outcome of processing one page.
#[derive(Debug, Default)]
pub struct PageReport {
    /// Tweets on the page.
    pub posts: usize,
    /// Tweets that passed the account filter.
    pub matched: usize,
    pub downloaded: Vec<PathBuf>,
    pub unfavorited: Vec<String>,
    pub links_logged: usize,
    pub failures: Vec<TaskFailure>,
}

impl PageReport {
    pub(crate) fn record(&mut self, result: std::result::Result<TaskOutcome, TaskFailure>) {
        match result {
            Ok(TaskOutcome::Downloaded(path)) => self.downloaded.push(path),
            Ok(TaskOutcome::Unfavorited {
                tweet_id,
                links_logged,
            }) => {
                self.unfavorited.push(tweet_id);
                self.links_logged += links_logged;
            }
            Err(failure) => {
                tracing::warn!("{}", failure);
                self.failures.push(failure);
            }
        }
    }
}
