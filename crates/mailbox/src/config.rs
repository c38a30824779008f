//! Client configuration loading
//!
//! Settings are resolved in order of priority:
//! 1. Runtime environment variables (`COURIER_*`)
//! 2. JSON file (~/.config/courier/courier.json)
//! 3. Built-in defaults

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::gmail::{StaticToken, StoredTokenFile, TokenSource};

/// Config filename in the Courier config directory
const CONFIG_FILE: &str = "courier.json";

/// Gmail REST API base URL
pub const DEFAULT_BASE_URL: &str = "https://gmail.googleapis.com/gmail/v1";

/// Whole-request timeout applied to every provider call
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_BASE_URL: &str = "COURIER_API_BASE_URL";
const ENV_TIMEOUT: &str = "COURIER_TIMEOUT_SECS";
const ENV_TOKEN_FILE: &str = "COURIER_TOKEN_FILE";
const ENV_ACCESS_TOKEN: &str = "COURIER_ACCESS_TOKEN";

/// Settings for talking to the mailbox provider
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Token file written by the sign-in flow; defaults to the config directory
    pub token_file: Option<PathBuf>,
    /// Bearer token supplied directly, bypassing the token file
    pub access_token: Option<String>,
}

/// On-disk config format; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    token_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token_file: None,
            access_token: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the default file and the environment
    pub fn load() -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(path) = Self::default_config_path() {
            if let Some(file) = config::read_json_if_exists::<ConfigFile>(&path)? {
                cfg.apply_file(file);
            }
        }

        cfg.apply_env(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    /// Load configuration from a specific JSON file, then the environment
    pub fn from_file(path: &Path) -> Result<Self> {
        let file: ConfigFile = config::read_json(path)?;
        let mut cfg = Self::default();
        cfg.apply_file(file);
        cfg.apply_env(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    /// Parse configuration from a JSON string, without environment overrides
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(json).context("Failed to parse config JSON")?;
        let mut cfg = Self::default();
        cfg.apply_file(file);
        Ok(cfg)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(base_url) = file.base_url {
            self.base_url = base_url;
        }
        if let Some(timeout_secs) = file.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        if file.token_file.is_some() {
            self.token_file = file.token_file;
        }
    }

    /// Apply overrides from an environment lookup
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT) {
            self.timeout_secs = timeout
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", ENV_TIMEOUT))?;
        }
        if let Some(path) = lookup(ENV_TOKEN_FILE) {
            self.token_file = Some(PathBuf::from(path));
        }
        if let Some(token) = lookup(ENV_ACCESS_TOKEN).filter(|t| !t.trim().is_empty()) {
            self.access_token = Some(token);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Token source for these settings: a direct token wins over the token file
    pub fn token_source(&self) -> Result<Box<dyn TokenSource>> {
        if let Some(token) = &self.access_token {
            return Ok(Box::new(StaticToken::new(token.clone())));
        }

        let source = match &self.token_file {
            Some(path) => StoredTokenFile::new(path.clone()),
            None => StoredTokenFile::default_location()?,
        };
        Ok(Box::new(source))
    }

    /// Default config file (~/.config/courier/courier.json)
    pub fn default_config_path() -> Option<PathBuf> {
        config::config_path(CONFIG_FILE)
    }
}
