//! Extraction of attachments and links from tweets.

use std::collections::HashSet;

use crate::api::types::Tweet;
use crate::media::item::MediaAttachment;

/// Collect the tweet's attachments from both media lists.
///
/// Standard entities come first. A media id present in both lists yields a
/// single attachment. Entities whose URL has no file name are skipped.
pub fn extract_attachments(tweet: &Tweet) -> Vec<MediaAttachment> {
    let extended = tweet
        .extended_entities
        .as_ref()
        .map(|e| e.media.as_slice())
        .unwrap_or_default();

    let mut seen = HashSet::new();
    let mut attachments = Vec::new();

    for media in tweet.entities.media.iter().chain(extended) {
        match MediaAttachment::from_media(media) {
            Ok(item) => {
                if seen.insert(item.media_id.clone()) {
                    attachments.push(item);
                }
            }
            Err(e) => {
                tracing::warn!("Skipping media in tweet {}: {}", tweet.id_str, e);
            }
        }
    }

    attachments
}

/// Embedded link targets of a tweet, in order.
pub fn extract_links(tweet: &Tweet) -> Vec<String> {
    tweet
        .entities
        .urls
        .iter()
        .map(|u| u.target().to_string())
        .collect()
}
