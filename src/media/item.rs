//! Media attachment representation.

use url::Url;

use crate::api::types::Media;
use crate::error::{Error, Result};

/// Size variant suffix appended to image URLs.
pub const LARGE_SUFFIX: &str = ":large";

/// One downloadable image attached to a tweet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAttachment {
    /// Media id, used to de-duplicate between the media lists.
    pub media_id: String,

    /// Source URL as returned by the API.
    pub source_url: String,

    /// Final path segment of the source URL.
    pub file_name: String,
}

impl MediaAttachment {
    /// Build an attachment from a source URL.
    pub fn from_url(media_id: impl Into<String>, source_url: &str) -> Result<Self> {
        let parsed = Url::parse(source_url)?;
        let file_name = parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| Error::Media(format!("No file name in media URL: {}", source_url)))?
            .to_string();

        Ok(Self {
            media_id: media_id.into(),
            source_url: source_url.to_string(),
            file_name,
        })
    }

    /// Build an attachment from an API media entity, preferring the https URL.
    pub fn from_media(media: &Media) -> Result<Self> {
        let source = if media.media_url_https.is_empty() {
            &media.media_url
        } else {
            &media.media_url_https
        };

        let id = if media.id_str.is_empty() {
            source.clone()
        } else {
            media.id_str.clone()
        };

        Self::from_url(id, source)
    }

    /// URL of the large size variant.
    pub fn large_url(&self) -> String {
        format!("{}{}", self.source_url, LARGE_SUFFIX)
    }
}
