//! Configuration module.
//!
//! This module handles:
//! - Loading and saving the JSON settings file
//! - First-run prompting through a provider
//! - Settings validation
//! - Building the run options for the harvesting loop

pub mod options;
pub mod provider;
pub mod settings;
pub mod validation;

pub use options::RunOptions;
pub use provider::{
    default_settings_path, ConfigProvider, FileConfigProvider, Prompter, SettingsField, APP_NAME,
};
pub use settings::Settings;
pub use validation::{parse_timeout, parse_tweet_id, validate_settings};
