//! Courier config directory
//!
//! Settings and the sign-in token file live in one directory, normally
//! ~/.config/courier/. Setting `COURIER_CONFIG_DIR` relocates it.
//!
//! Call [`init`] at application startup to bootstrap the config directory.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config directory
pub const DIR_ENV: &str = "COURIER_CONFIG_DIR";

const APP_DIR: &str = "courier";

/// Create the config directory if it doesn't exist yet
pub fn init() -> Result<PathBuf> {
    let dir = config_dir().context("Could not determine config directory")?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
    Ok(dir)
}

/// The config directory, if one can be determined on this platform
pub fn config_dir() -> Option<PathBuf> {
    resolve_dir(std::env::var_os(DIR_ENV))
}

fn resolve_dir(override_dir: Option<OsString>) -> Option<PathBuf> {
    override_dir
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|p| p.join(APP_DIR)))
}

/// Path of a file inside the config directory
pub fn config_path(filename: &str) -> Option<PathBuf> {
    config_dir().map(|p| p.join(filename))
}

/// Read and parse a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Like [`read_json`], but a missing file is `Ok(None)`
pub fn read_json_if_exists<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    read_json(path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Settings {
        name: String,
    }

    #[test]
    fn test_override_dir_wins() {
        let dir = resolve_dir(Some(OsString::from("/tmp/courier-test")));
        assert_eq!(dir, Some(PathBuf::from("/tmp/courier-test")));
    }

    #[test]
    fn test_empty_override_uses_platform_dir() {
        if let Some(dir) = resolve_dir(Some(OsString::new())) {
            assert!(dir.ends_with(APP_DIR));
        }
    }

    #[test]
    fn test_read_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "name": "courier" }"#).unwrap();

        let settings: Settings = read_json(&path).unwrap();
        assert_eq!(settings.name, "courier");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        assert!(read_json_if_exists::<Settings>(&path).unwrap().is_none());
        let err = read_json::<Settings>(&path).unwrap_err();
        assert!(format!("{err}").contains("missing.json"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ name: ").unwrap();

        let err = read_json_if_exists::<Settings>(&path).unwrap_err();
        assert!(format!("{err}").contains("Failed to parse"));
    }
}
