//! In-memory API double for the download tests.

use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::types::{Entities, ExtendedEntities, Media, Tweet, UrlEntity, User};
use crate::api::FavoritesApi;
use crate::error::{Error, Result};

/// Records every call and serves scripted pages.
#[derive(Default)]
pub struct FakeApi {
    pub pages: Mutex<VecDeque<Result<Vec<Tweet>>>>,
    pub page_requests: Mutex<Vec<Option<String>>>,
    pub media_requests: Mutex<Vec<String>>,
    /// Tweet id and the link log contents at the time of the removal call.
    pub unfavorites: Mutex<Vec<(String, String)>>,
    pub failing_urls: HashSet<String>,
    pub failing_unfavorites: HashSet<String>,
    /// Link log to snapshot when an un-favorite call arrives.
    pub link_log: Option<PathBuf>,
    /// Body returned for every media request.
    pub media_body: Vec<u8>,
}

impl FakeApi {
    pub fn with_pages(pages: Vec<Vec<Tweet>>) -> Self {
        Self {
            pages: Mutex::new(pages.into_iter().map(Ok).collect()),
            media_body: b"image-bytes".to_vec(),
            ..Default::default()
        }
    }

    pub fn page_requests(&self) -> Vec<Option<String>> {
        self.page_requests.lock().unwrap().clone()
    }

    pub fn media_requests(&self) -> Vec<String> {
        let mut requests = self.media_requests.lock().unwrap().clone();
        requests.sort();
        requests
    }

    pub fn unfavorites(&self) -> Vec<(String, String)> {
        self.unfavorites.lock().unwrap().clone()
    }
}

#[async_trait]
impl FavoritesApi for FakeApi {
    async fn favorites_page(&self, max_id: Option<&str>) -> Result<Vec<Tweet>> {
        self.page_requests
            .lock()
            .unwrap()
            .push(max_id.map(str::to_string));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn unfavorite(&self, tweet_id: &str) -> Result<()> {
        let log = self
            .link_log
            .as_ref()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .unwrap_or_default();
        self.unfavorites
            .lock()
            .unwrap()
            .push((tweet_id.to_string(), log));

        if self.failing_unfavorites.contains(tweet_id) {
            return Err(Error::Unfavorite(format!("{}: HTTP 404 Not Found", tweet_id)));
        }
        Ok(())
    }

    async fn fetch_media(&self, url: &str) -> Result<Vec<u8>> {
        self.media_requests.lock().unwrap().push(url.to_string());
        if self.failing_urls.contains(url) {
            return Err(Error::Download(format!("Failed to download {}: HTTP 500", url)));
        }
        Ok(self.media_body.clone())
    }
}

fn media(name: &str) -> Media {
    Media {
        id_str: format!("m-{}", name),
        media_url: format!("http://pbs.twimg.com/media/{}", name),
        media_url_https: format!("https://pbs.twimg.com/media/{}", name),
        media_type: "photo".to_string(),
    }
}

/// Build a tweet with the given media file names and links.
pub fn tweet(id: &str, handle: &str, media_names: &[&str], links: &[&str]) -> Tweet {
    Tweet {
        id_str: id.to_string(),
        text: String::new(),
        user: User {
            screen_name: handle.to_string(),
            id_str: String::new(),
            name: String::new(),
        },
        entities: Entities {
            urls: links
                .iter()
                .map(|l| UrlEntity {
                    url: format!("https://t.co/{}", l.len()),
                    expanded_url: Some(l.to_string()),
                    display_url: None,
                })
                .collect(),
            media: media_names.iter().map(|n| media(n)).collect(),
        },
        extended_entities: None,
    }
}

/// Same as [`tweet`], with the media repeated in the extended list.
pub fn tweet_with_extended(id: &str, handle: &str, media_names: &[&str]) -> Tweet {
    let mut t = tweet(id, handle, media_names, &[]);
    t.extended_entities = Some(ExtendedEntities {
        media: media_names.iter().map(|n| media(n)).collect(),
    });
    t
}

/// Large-variant URL for a media file name built by [`tweet`].
pub fn large_url(name: &str) -> String {
    format!("https://pbs.twimg.com/media/{}:large", name)
}
