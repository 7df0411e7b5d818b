//! Configuration validation logic.

use std::time::Duration;

use regex::Regex;

use crate::config::settings::Settings;
use crate::error::{Error, Result};

/// Longest decimal tweet id (fits an unsigned 64-bit integer).
const MAX_TWEET_ID_DIGITS: usize = 20;

/// Validate the settings needed before authorizing.
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_credential("ConsumerKey", &settings.consumer_key)?;
    validate_credential("ConsumerSecret", &settings.consumer_secret)?;
    validate_handles(&settings.filter_account)?;

    if let Some(timeout) = &settings.request_timeout_secs {
        parse_timeout(timeout)?;
    }

    Ok(())
}

/// Validate a consumer credential.
pub fn validate_credential(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::MissingConfig(field.to_string()));
    }

    let lower = value.to_lowercase();
    if lower.contains("replaceme") || lower.contains("your_") {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: "Value appears to be a placeholder. Use the key from your Twitter app."
                .to_string(),
        });
    }

    Ok(())
}

/// Validate the comma-separated `FilterAccount` list.
pub fn validate_handles(list: &str) -> Result<()> {
    // Screen names: 1-15 chars, alphanumeric and underscores
    let handle_pattern = Regex::new(r"^[A-Za-z0-9_]{1,15}$").unwrap();

    for handle in list.split(',') {
        let clean = handle.trim().trim_start_matches('@');
        if clean.is_empty() {
            continue;
        }

        if !handle_pattern.is_match(clean) {
            return Err(Error::ConfigValidation {
                field: "FilterAccount".to_string(),
                message: format!(
                    "'{}' is not a valid screen name. Only 1-15 letters, digits and underscores allowed.",
                    handle.trim()
                ),
            });
        }
    }

    Ok(())
}

/// Extract a tweet id from a decimal string or a status URL.
pub fn parse_tweet_id(input: &str) -> Result<String> {
    let input = input.trim();

    if input.starts_with("http://") || input.starts_with("https://") {
        // Pattern: https://twitter.com/<handle>/status/1234567890
        let status_pattern = Regex::new(r"/status(?:es)?/(\d{1,20})").unwrap();

        if let Some(id) = status_pattern.captures(input).and_then(|c| c.get(1)) {
            return Ok(id.as_str().to_string());
        }

        return Err(Error::ConfigValidation {
            field: "tweetid".to_string(),
            message: format!("Could not extract tweet ID from URL: {}", input),
        });
    }

    let id_pattern = Regex::new(r"^\d+$").unwrap();
    if id_pattern.is_match(input) && input.len() <= MAX_TWEET_ID_DIGITS {
        return Ok(input.to_string());
    }

    Err(Error::ConfigValidation {
        field: "tweetid".to_string(),
        message: format!(
            "Invalid tweet ID: '{}'. Must be 1-{} digits or a tweet URL.",
            input, MAX_TWEET_ID_DIGITS
        ),
    })
}

/// Parse a timeout given in whole seconds.
pub fn parse_timeout(input: &str) -> Result<Duration> {
    match input.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::ConfigValidation {
            field: "RequestTimeoutSecs".to_string(),
            message: format!("'{}' is not a positive number of seconds", input),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(key: &str, secret: &str, filter: &str) -> Settings {
        Settings {
            consumer_key: key.to_string(),
            consumer_secret: secret.to_string(),
            filter_account: filter.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_settings() {
        assert!(validate_settings(&settings("abc", "def", "alice, @Bob_2")).is_ok());
        assert!(validate_settings(&settings("abc", "def", "")).is_ok());
    }

    #[test]
    fn test_missing_consumer_key() {
        assert!(matches!(
            validate_settings(&settings("", "def", "")),
            Err(Error::MissingConfig(_))
        ));
    }

    #[test]
    fn test_placeholder_credential() {
        assert!(validate_credential("ConsumerKey", "REPLACEME").is_err());
    }

    #[test]
    fn test_invalid_handle() {
        assert!(validate_handles("alice,not a handle").is_err());
        assert!(validate_handles("waytoolonghandle123").is_err());
        assert!(validate_handles("alice,,bob,").is_ok());
    }

    #[test]
    fn test_parse_tweet_id_direct() {
        assert_eq!(parse_tweet_id("1050118621198921728").unwrap(), "1050118621198921728");
        assert_eq!(parse_tweet_id(" 42 ").unwrap(), "42");
    }

    #[test]
    fn test_parse_tweet_id_url() {
        let url = "https://twitter.com/someone/status/1050118621198921728";
        assert_eq!(parse_tweet_id(url).unwrap(), "1050118621198921728");
    }

    #[test]
    fn test_parse_tweet_id_invalid() {
        assert!(parse_tweet_id("12a").is_err());
        assert!(parse_tweet_id("").is_err());
        assert!(parse_tweet_id("123456789012345678901").is_err());
        assert!(parse_tweet_id("https://example.com/nothing").is_err());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("30").unwrap(), Duration::from_secs(30));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
    }
}
