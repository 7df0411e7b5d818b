//! Settings provider: loading, first-run prompting and persistence.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::config::settings::Settings;
use crate::error::{Error, Result};

/// Folder name used for the config directory and the download root.
pub const APP_NAME: &str = "twitter-favorite-pics";

/// File name of the settings file inside the config directory.
const SETTINGS_FILE: &str = "settings.json";

/// Source of interactive answers.
pub trait Prompter {
    /// Show `question` and return the trimmed answer.
    fn ask(&self, question: &str) -> Result<String>;

    /// Ask a yes/no question. Only `y`/`yes` count as yes.
    fn confirm(&self, question: &str) -> Result<bool> {
        let answer = self.ask(question)?.to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}

/// Settings fields that are filled in interactively on first run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    ConsumerKey,
    ConsumerSecret,
    DownloadPath,
    FilterAccount,
    DownloadWithoutAsking,
    UnFavAfterDownload,
    LogPath,
}

impl SettingsField {
    /// Every field, in the order they are asked.
    pub const ALL: [SettingsField; 7] = [
        SettingsField::ConsumerKey,
        SettingsField::ConsumerSecret,
        SettingsField::DownloadPath,
        SettingsField::FilterAccount,
        SettingsField::DownloadWithoutAsking,
        SettingsField::UnFavAfterDownload,
        SettingsField::LogPath,
    ];

    fn question(&self) -> &'static str {
        match self {
            SettingsField::ConsumerKey => "Enter consumer key: ",
            SettingsField::ConsumerSecret => "Enter consumer secret: ",
            SettingsField::DownloadPath => "Enter download path: ",
            SettingsField::FilterAccount => {
                "Enter twitter screen names to download from (comma separated, empty for all): "
            }
            SettingsField::DownloadWithoutAsking => "Continue download without asking? (y/N): ",
            SettingsField::UnFavAfterDownload => "Un-favorite tweet after download? (y/N): ",
            SettingsField::LogPath => "Enter link log path (empty for default): ",
        }
    }
}

/// Supplies the settings the run starts from.
pub trait ConfigProvider {
    /// Read persisted settings, `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Settings>>;

    /// Build settings by asking for each of `fields`.
    fn prompt(&self, fields: &[SettingsField]) -> Result<Settings>;

    /// Persist settings.
    fn store(&self, settings: &Settings) -> Result<()>;

    /// Load settings, prompting for all fields when none exist yet.
    ///
    /// Prompted settings are not stored here; they are written together
    /// with the access token once authorization succeeds.
    fn load_or_prompt(&self) -> Result<Settings> {
        match self.load()? {
            Some(settings) => Ok(settings),
            None => self.prompt(&SettingsField::ALL),
        }
    }
}

/// JSON-file provider that prompts through a [`Prompter`].
pub struct FileConfigProvider<P> {
    path: PathBuf,
    prompter: P,
}

impl<P: Prompter> FileConfigProvider<P> {
    pub fn new(path: PathBuf, prompter: P) -> Self {
        Self { path, prompter }
    }

    /// Location of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }
}

impl<P: Prompter> ConfigProvider for FileConfigProvider<P> {
    fn load(&self) -> Result<Option<Settings>> {
        Settings::load(&self.path)
    }

    fn prompt(&self, fields: &[SettingsField]) -> Result<Settings> {
        let mut settings = Settings::default();

        for field in fields {
            match field {
                SettingsField::ConsumerKey => {
                    settings.consumer_key = self.prompter.ask(field.question())?;
                }
                SettingsField::ConsumerSecret => {
                    settings.consumer_secret = self.prompter.ask(field.question())?;
                }
                SettingsField::DownloadPath => {
                    settings.download_path = non_empty(self.prompter.ask(field.question())?);
                }
                SettingsField::FilterAccount => {
                    settings.filter_account = self.prompter.ask(field.question())?;
                }
                SettingsField::DownloadWithoutAsking => {
                    settings.download_without_asking = self.prompter.confirm(field.question())?;
                }
                SettingsField::UnFavAfterDownload => {
                    settings.un_fav_after_download = self.prompter.confirm(field.question())?;
                }
                SettingsField::LogPath => {
                    settings.log_path = non_empty(self.prompter.ask(field.question())?);
                }
            }
        }

        Ok(settings)
    }

    fn store(&self, settings: &Settings) -> Result<()> {
        settings.save(&self.path)
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Default settings file location inside the platform config directory.
pub fn default_settings_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", APP_NAME)
        .ok_or_else(|| Error::Config("Could not determine the config directory".into()))?;
    Ok(dirs.config_dir().join(SETTINGS_FILE))
}
