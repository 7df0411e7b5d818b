//! OAuth1 authorization handshake (PIN-based, out-of-band).

use std::process::{Command, Stdio};
use std::time::Duration;

use reqwest::{header, Client};

use crate::api::auth::{authorization_header, ConsumerCredentials, TokenPair};
use crate::config::Prompter;
use crate::error::{Error, Result};

/// OAuth endpoint root.
const OAUTH_BASE: &str = "https://api.twitter.com/oauth";

/// Drives the request-token / authorize / access-token exchange.
pub struct Authorizer {
    client: Client,
    consumer: ConsumerCredentials,
    oauth_base: String,
}

impl Authorizer {
    pub fn new(consumer: ConsumerCredentials, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            consumer,
            oauth_base: OAUTH_BASE.to_string(),
        })
    }

    /// Point the handshake at a different OAuth root.
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.oauth_base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Obtain a temporary request token.
    pub async fn request_token(&self) -> Result<TokenPair> {
        let url = format!("{}/request_token", self.oauth_base);
        self.token_request(&url, None, &[("oauth_callback", "oob")])
            .await
    }

    /// URL where the user grants access and receives a PIN.
    pub fn authorize_url(&self, request_token: &TokenPair) -> String {
        format!(
            "{}/authorize?oauth_token={}",
            self.oauth_base,
            urlencoding::encode(&request_token.token)
        )
    }

    /// Exchange the request token and PIN for an access token.
    pub async fn access_token(
        &self,
        request_token: &TokenPair,
        verifier: &str,
    ) -> Result<TokenPair> {
        let url = format!("{}/access_token", self.oauth_base);
        self.token_request(&url, Some(request_token), &[("oauth_verifier", verifier)])
            .await
    }

    async fn token_request(
        &self,
        url: &str,
        token: Option<&TokenPair>,
        extra_oauth: &[(&str, &str)],
    ) -> Result<TokenPair> {
        let auth = authorization_header("POST", url, &[], &self.consumer, token, extra_oauth)?;

        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .header(header::AUTHORIZATION, auth)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Authentication(format!("HTTP {}: {}", status, text)));
        }

        parse_token_response(&text)
    }
}

/// Parse a form-encoded `oauth_token=...&oauth_token_secret=...` body.
pub fn parse_token_response(body: &str) -> Result<TokenPair> {
    let mut token = None;
    let mut secret = None;

    for (key, value) in url::form_urlencoded::parse(body.trim().as_bytes()) {
        match key.as_ref() {
            "oauth_token" => token = Some(value.into_owned()),
            "oauth_token_secret" => secret = Some(value.into_owned()),
            _ => {}
        }
    }

    match (token, secret) {
        (Some(token), Some(secret)) => Ok(TokenPair { token, secret }),
        _ => Err(Error::Authentication(format!(
            "Token response is missing oauth_token or oauth_token_secret: {}",
            body
        ))),
    }
}

/// Return the stored access token, or run the interactive handshake.
pub async fn authorize(
    authorizer: &Authorizer,
    stored: Option<TokenPair>,
    prompter: &dyn Prompter,
) -> Result<TokenPair> {
    if let Some(token) = stored {
        tracing::debug!("Using stored access token");
        return Ok(token);
    }

    let request_token = authorizer.request_token().await?;
    let url = authorizer.authorize_url(&request_token);

    println!("(1) Go to: {}", url);
    println!("(2) Grant access, you should get back a verification code.");

    if let Err(e) = open_browser(&url) {
        tracing::warn!("Could not open a browser: {}", e);
    }

    let verifier = prompter.ask("(3) Enter that verification code here: ")?;
    if verifier.is_empty() {
        return Err(Error::Authentication("No verification code entered".into()));
    }

    authorizer.access_token(&request_token, &verifier).await
}

/// Open `url` with the platform's default browser.
pub fn open_browser(url: &str) -> Result<()> {
    let (program, args): (&str, Vec<&str>) = if cfg!(target_os = "windows") {
        ("rundll32.exe", vec!["url.dll,FileProtocolHandler", url])
    } else if cfg!(target_os = "macos") {
        ("open", vec![url])
    } else {
        ("xdg-open", vec![url])
    };

    let mut child = Command::new(program)
        .args(&args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    // Reap the launcher so it does not linger as a zombie.
    std::thread::spawn(move || {
        let _ = child.wait();
    });

    Ok(())
}
