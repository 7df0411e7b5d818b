//! Account allow-list.

use std::collections::BTreeSet;

/// Case-insensitive allow-list of account handles.
///
/// An empty filter lets every account through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter {
    handles: BTreeSet<String>,
}

impl AccountFilter {
    /// Parse a comma-separated handle list. Blank entries and a leading `@`
    /// are ignored.
    pub fn parse(list: &str) -> Self {
        list.split(',').collect()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Whether posts by `handle` should be processed.
    pub fn matches(&self, handle: &str) -> bool {
        self.handles.is_empty() || self.handles.contains(&normalize(handle))
    }

    /// Normalized handles in sorted order.
    pub fn handles(&self) -> impl Iterator<Item = &str> {
        self.handles.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for AccountFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let handles = iter
            .into_iter()
            .map(|h| normalize(h.as_ref()))
            .filter(|h| !h.is_empty())
            .collect();
        Self { handles }
    }
}

fn normalize(handle: &str) -> String {
    handle.trim().trim_start_matches('@').to_lowercase()
}
