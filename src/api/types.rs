//! API response type definitions.
//!
//! Only the fields the harvester reads are modelled; everything else in the
//! favorites payload is ignored during deserialization.

use serde::Deserialize;

/// A favorited tweet from `favorites/list.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id_str: String,
    #[serde(default)]
    pub text: String,
    pub user: User,
    #[serde(default)]
    pub entities: Entities,
    #[serde(default)]
    pub extended_entities: Option<ExtendedEntities>,
}

impl Tweet {
    /// Author handle (screen name).
    pub fn handle(&self) -> &str {
        &self.user.screen_name
    }
}

/// Tweet author.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub screen_name: String,
    #[serde(default)]
    pub id_str: String,
    #[serde(default)]
    pub name: String,
}

/// Standard entities attached to a tweet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub urls: Vec<UrlEntity>,
    #[serde(default)]
    pub media: Vec<Media>,
}

/// Extended entities; carries every photo of multi-image tweets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtendedEntities {
    #[serde(default)]
    pub media: Vec<Media>,
}

/// Embedded link.
#[derive(Debug, Clone, Deserialize)]
pub struct UrlEntity {
    pub url: String,
    #[serde(default)]
    pub expanded_url: Option<String>,
    #[serde(default)]
    pub display_url: Option<String>,
}

impl UrlEntity {
    /// The link target, preferring the expanded form over the t.co wrapper.
    pub fn target(&self) -> &str {
        self.expanded_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(&self.url)
    }
}

/// Media entity.
#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub id_str: String,
    #[serde(default)]
    pub media_url: String,
    #[serde(default)]
    pub media_url_https: String,
    #[serde(rename = "type", default)]
    pub media_type: String,
}
