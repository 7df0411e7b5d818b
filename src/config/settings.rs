//! Persisted settings file.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::auth::{ConsumerCredentials, TokenPair};
use crate::error::{Error, Result};

/// The flat JSON settings object.
///
/// Booleans are stored as `"true"`/`"false"` strings. Keys this program does
/// not know about are carried through a rewrite untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    #[serde(default)]
    pub consumer_key: String,

    #[serde(default)]
    pub consumer_secret: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_secret: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_path: Option<String>,

    /// Comma-separated account handles.
    #[serde(default)]
    pub filter_account: String,

    #[serde(default, with = "string_bool")]
    pub download_without_asking: bool,

    #[serde(default, with = "string_bool")]
    pub un_fav_after_download: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Settings {
    /// Load settings from a JSON file. Returns `None` when the file is absent.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::Io(e)),
        };

        let settings: Settings = serde_json::from_str(&content).map_err(|e| {
            Error::Config(format!("Could not parse {}: {}", path.display(), e))
        })?;

        Ok(Some(settings))
    }

    /// Save settings as pretty-printed JSON, creating the parent directory.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Consumer credentials of the registered application.
    pub fn consumer(&self) -> ConsumerCredentials {
        ConsumerCredentials {
            key: self.consumer_key.clone(),
            secret: self.consumer_secret.clone(),
        }
    }

    /// Stored access token, if both halves are present.
    pub fn access_token_pair(&self) -> Option<TokenPair> {
        match (&self.access_token, &self.access_secret) {
            (Some(token), Some(secret)) if !token.is_empty() && !secret.is_empty() => {
                Some(TokenPair {
                    token: token.clone(),
                    secret: secret.clone(),
                })
            }
            _ => None,
        }
    }

    /// Merge a freshly obtained access token into the settings.
    pub fn set_access_token(&mut self, token: &TokenPair) {
        self.access_token = Some(token.token.clone());
        self.access_secret = Some(token.secret.clone());
    }
}

/// Serde adapter for `"true"`/`"false"` string booleans.
mod string_bool {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.trim().eq_ignore_ascii_case("true"))
    }
}
