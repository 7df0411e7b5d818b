//! Twitter API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};

use crate::api::auth::{authorization_header, ConsumerCredentials, TokenPair};
use crate::api::types::Tweet;
use crate::error::{Error, Result};

/// Twitter REST API base URL.
const API_BASE: &str = "https://api.twitter.com/1.1";

/// Maximum favorites per page request.
pub const PAGE_SIZE: u32 = 200;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Operations the harvesting core needs from the API.
#[async_trait]
pub trait FavoritesApi: Send + Sync {
    /// Fetch one page of favorites, newest first, bounded above by `max_id`.
    async fn favorites_page(&self, max_id: Option<&str>) -> Result<Vec<Tweet>>;

    /// Remove a tweet from the user's favorites.
    async fn unfavorite(&self, tweet_id: &str) -> Result<()>;

    /// Fetch the raw bytes of a media URL.
    async fn fetch_media(&self, url: &str) -> Result<Vec<u8>>;
}

/// OAuth1-signed Twitter API client.
pub struct TwitterApi {
    client: Client,
    consumer: ConsumerCredentials,
    token: TokenPair,
    api_base: String,
}

impl TwitterApi {
    /// Create a client signing every request with the given access token.
    pub fn new(consumer: ConsumerCredentials, token: TokenPair, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            consumer,
            token,
            api_base: API_BASE.to_string(),
        })
    }

    /// Point the client at a different API root.
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Make a signed GET request.
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Response> {
        let url = self.endpoint(path);
        let auth =
            authorization_header("GET", &url, query, &self.consumer, Some(&self.token), &[])?;

        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .header(header::AUTHORIZATION, auth)
            .send()
            .await?;

        tracing::debug!("Response status: {}", response.status());
        Ok(response)
    }

    /// Make a signed POST request with a JSON body.
    async fn post_json(
        &self,
        path: &str,
        query: &[(String, String)],
        body: &serde_json::Value,
    ) -> Result<Response> {
        let url = self.endpoint(path);
        let auth =
            authorization_header("POST", &url, query, &self.consumer, Some(&self.token), &[])?;

        tracing::debug!("POST {} {:?}", url, query);

        let response = self
            .client
            .post(&url)
            .query(query)
            .header(header::AUTHORIZATION, auth)
            .json(body)
            .send()
            .await?;

        tracing::debug!("Response status: {}", response.status());
        Ok(response)
    }
}

#[async_trait]
impl FavoritesApi for TwitterApi {
    async fn favorites_page(&self, max_id: Option<&str>) -> Result<Vec<Tweet>> {
        let mut query = vec![("count".to_string(), PAGE_SIZE.to_string())];
        if let Some(max_id) = max_id {
            query.push(("max_id".to_string(), max_id.to_string()));
        }

        let response = self.get("/favorites/list.json", &query).await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication(format!("HTTP {}: {}", status, text)));
        }

        if !status.is_success() {
            return Err(Error::Api(format!(
                "Failed to get favorites: HTTP {} - {}",
                status, text
            )));
        }

        serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse favorites: {} - Response: {}",
                e,
                text.chars().take(500).collect::<String>()
            ))
        })
    }

    async fn unfavorite(&self, tweet_id: &str) -> Result<()> {
        let query = vec![("id".to_string(), tweet_id.to_string())];
        let body = serde_json::json!({ "id": tweet_id });

        let response = self.post_json("/favorites/destroy.json", &query, &body).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::Unfavorite(format!("{}: HTTP {}", tweet_id, status)));
        }

        Ok(())
    }

    async fn fetch_media(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "Failed to download {}: HTTP {}",
                url,
                response.status()
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_api(server: &MockServer) -> TwitterApi {
        TwitterApi::new(
            ConsumerCredentials {
                key: "ckey".to_string(),
                secret: "csecret".to_string(),
            },
            TokenPair {
                token: "tok".to_string(),
                secret: "tsecret".to_string(),
            },
            Duration::from_secs(5),
        )
        .unwrap()
        .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_favorites_page_with_max_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/favorites/list.json"))
            .and(query_param("count", "200"))
            .and(query_param("max_id", "1000"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id_str": "999", "user": {"screen_name": "alice"}},
                {"id_str": "998", "user": {"screen_name": "bob"}}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let page = test_api(&server).favorites_page(Some("1000")).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[1].id_str, "998");
    }

    #[tokio::test]
    async fn test_favorites_page_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/favorites/list.json"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = test_api(&server).favorites_page(None).await.unwrap_err();
        assert!(matches!(err, Error::Api(_)));
    }

    #[tokio::test]
    async fn test_favorites_page_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/favorites/list.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"a list\"}"))
            .mount(&server)
            .await;

        let err = test_api(&server).favorites_page(None).await.unwrap_err();
        assert!(matches!(err, Error::Api(_)));
    }

    #[tokio::test]
    async fn test_favorites_page_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/favorites/list.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([]))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let api = TwitterApi::new(
            ConsumerCredentials {
                key: "ckey".to_string(),
                secret: "csecret".to_string(),
            },
            TokenPair {
                token: "tok".to_string(),
                secret: "tsecret".to_string(),
            },
            Duration::from_secs(1),
        )
        .unwrap()
        .with_base_url(server.uri());

        let err = api.favorites_page(None).await.unwrap_err();
        match err {
            Error::Http(e) => assert!(e.is_timeout()),
            other => panic!("expected a timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_favorites_page_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/favorites/list.json"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = test_api(&server).favorites_page(None).await.unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
    }

    #[tokio::test]
    async fn test_unfavorite_sends_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/favorites/destroy.json"))
            .and(query_param("id", "123"))
            .and(body_json(serde_json::json!({"id": "123"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        test_api(&server).unfavorite("123").await.unwrap();
    }

    #[tokio::test]
    async fn test_unfavorite_non_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/favorites/destroy.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = test_api(&server).unfavorite("123").await.unwrap_err();
        assert!(matches!(err, Error::Unfavorite(_)));
    }

    #[tokio::test]
    async fn test_fetch_media() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/media/abc.jpg:large"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpegdata".to_vec()))
            .mount(&server)
            .await;

        let bytes = test_api(&server)
            .fetch_media(&format!("{}/media/abc.jpg:large", server.uri()))
            .await
            .unwrap();
        assert_eq!(bytes, b"jpegdata");
    }
}
