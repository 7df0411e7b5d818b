//! Path and directory management.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::config::provider::APP_NAME;
use crate::error::{Error, Result};
use crate::fs::naming::{sanitize_filename, sanitize_path_component};

/// File name of the link log when `LogPath` is not configured.
const DEFAULT_LINK_LOG: &str = "unfavorited-links.txt";

/// Resolve the download root from the `DownloadPath` setting.
///
/// A leading `~/` is expanded to the home directory. Without a setting the
/// root is `downloads` next to the executable. The result always ends in
/// the application folder.
pub fn resolve_download_root(download_path: Option<&str>) -> Result<PathBuf> {
    let base = match download_path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => expand_home(path)?,
        None => executable_dir()?.join("downloads"),
    };

    Ok(base.join(APP_NAME))
}

/// Expand a leading `~/` (or a bare `~`) to the user's home directory.
pub fn expand_home(path: &str) -> Result<PathBuf> {
    let rest = if path == "~" {
        ""
    } else if let Some(rest) = path.strip_prefix("~/") {
        rest
    } else {
        return Ok(PathBuf::from(path));
    };

    let dirs = BaseDirs::new()
        .ok_or_else(|| Error::Config("Could not determine the home directory".into()))?;
    Ok(dirs.home_dir().join(rest))
}

fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// Target path of one media file: `<root>/<handle>/<file_name>`.
pub fn media_path(root: &Path, handle: &str, file_name: &str) -> Result<PathBuf> {
    let folder = sanitize_path_component(handle)?;
    let file = sanitize_filename(file_name)?;
    Ok(root.join(folder).join(file))
}

/// Expand the `LogPath` setting. Blank means "use the default".
pub fn expand_log_path(log_path: Option<&str>) -> Result<Option<PathBuf>> {
    log_path
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(expand_home)
        .transpose()
}

/// Link log location: the configured path, otherwise inside the download root.
pub fn resolve_link_log(log_path: Option<&Path>, download_root: &Path) -> PathBuf {
    match log_path {
        Some(path) => path.to_path_buf(),
        None => download_root.join(DEFAULT_LINK_LOG),
    }
}
