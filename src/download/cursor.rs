//! Paging cursor over tweet ids.

use std::cmp::Ordering;

use crate::api::types::Tweet;
use crate::error::{Error, Result};

/// Compare two decimal tweet ids numerically.
///
/// Ids of equal length compare lexicographically; a shorter id is smaller.
/// Ids from the API never carry leading zeros.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Upper bound for the next favorites page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    id: String,
    inclusive: bool,
}

impl Cursor {
    /// A user-supplied starting id; the tweet with this id is still processed.
    pub fn seeded(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            inclusive: true,
        }
    }

    /// Cursor after a page whose oldest tweet is `oldest_id`.
    pub fn after(oldest_id: impl Into<String>) -> Self {
        Self {
            id: oldest_id.into(),
            inclusive: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// `max_id` is inclusive on the API side, so the bound tweet comes back
    /// at the top of the next page. Drop it unless this cursor was seeded.
    pub fn trim_page(&self, page: Vec<Tweet>) -> Vec<Tweet> {
        if self.inclusive {
            return page;
        }
        page.into_iter().filter(|t| t.id_str != self.id).collect()
    }

    /// Move to the next page's cursor.
    ///
    /// Pages go strictly backward in time: an oldest id greater than the
    /// current bound means the API broke ordering and the run cannot trust
    /// any further cursor.
    pub fn advance(&self, oldest_id: &str) -> Result<Cursor> {
        if compare_ids(oldest_id, &self.id) == Ordering::Greater {
            return Err(Error::CursorRegression {
                previous: self.id.clone(),
                next: oldest_id.to_string(),
            });
        }
        Ok(Cursor::after(oldest_id))
    }
}
