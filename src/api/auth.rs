//! OAuth1 request signing (HMAC-SHA1).

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;

use crate::error::{Error, Result};

/// Length of the random nonce sent with every request.
const NONCE_LENGTH: usize = 32;

/// Application (consumer) credentials.
#[derive(Debug, Clone)]
pub struct ConsumerCredentials {
    pub key: String,
    pub secret: String,
}

/// A token and its secret. Used for both request tokens and access tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub token: String,
    pub secret: String,
}

/// Percent-encode per RFC 3986, leaving only `A-Z a-z 0-9 - . _ ~` untouched.
pub fn percent_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Generate a random alphanumeric nonce.
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}

/// Current Unix timestamp in seconds.
pub fn current_timestamp() -> String {
    Utc::now().timestamp().to_string()
}

/// Build the signature base string.
///
/// `params` holds every query, body-form and `oauth_*` parameter of the
/// request; `base_url` must not contain a query string.
pub fn signature_base_string(method: &str, base_url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(base_url),
        percent_encode(&param_string)
    )
}

/// Sign a base string with the consumer secret and optional token secret.
pub fn sign(
    base_string: &str,
    consumer_secret: &str,
    token_secret: Option<&str>,
) -> Result<String> {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret.unwrap_or(""))
    );

    let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
        .map_err(|e| Error::Authentication(format!("Invalid signing key: {}", e)))?;
    mac.update(base_string.as_bytes());

    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Build an `Authorization: OAuth ...` header value for one request.
///
/// `extra_oauth` carries handshake parameters such as `oauth_callback` or
/// `oauth_verifier`.
pub fn authorization_header(
    method: &str,
    base_url: &str,
    query: &[(String, String)],
    consumer: &ConsumerCredentials,
    token: Option<&TokenPair>,
    extra_oauth: &[(&str, &str)],
) -> Result<String> {
    authorization_header_with(
        method,
        base_url,
        query,
        consumer,
        token,
        extra_oauth,
        &generate_nonce(),
        &current_timestamp(),
    )
}

#[allow(clippy::too_many_arguments)]
fn authorization_header_with(
    method: &str,
    base_url: &str,
    query: &[(String, String)],
    consumer: &ConsumerCredentials,
    token: Option<&TokenPair>,
    extra_oauth: &[(&str, &str)],
    nonce: &str,
    timestamp: &str,
) -> Result<String> {
    let mut oauth_params: Vec<(String, String)> = vec![
        ("oauth_consumer_key".to_string(), consumer.key.clone()),
        ("oauth_nonce".to_string(), nonce.to_string()),
        ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
        ("oauth_timestamp".to_string(), timestamp.to_string()),
        ("oauth_version".to_string(), "1.0".to_string()),
    ];

    if let Some(token) = token {
        oauth_params.push(("oauth_token".to_string(), token.token.clone()));
    }

    for (key, value) in extra_oauth {
        oauth_params.push((key.to_string(), value.to_string()));
    }

    let mut all_params = oauth_params.clone();
    all_params.extend(query.iter().cloned());

    let base_string = signature_base_string(method, base_url, &all_params);
    let signature = sign(
        &base_string,
        &consumer.secret,
        token.map(|t| t.secret.as_str()),
    )?;

    oauth_params.push(("oauth_signature".to_string(), signature));
    oauth_params.sort();

    let fields = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("OAuth {}", fields))
}
