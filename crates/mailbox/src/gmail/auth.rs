//! Bearer credentials for Gmail API calls
//!
//! Tokens are produced by the external sign-in flow. This module only reads
//! them: either a token handed over directly, or the token file the sign-in
//! flow writes to the config directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Token file name in the Courier config directory
pub const TOKEN_FILE: &str = "gmail-tokens.json";

/// Seconds of remaining validity below which a stored token counts as expired
const EXPIRY_BUFFER_SECS: i64 = 300;

/// Source of OAuth2 bearer tokens
pub trait TokenSource: Send + Sync {
    /// Return a currently valid access token
    fn access_token(&self) -> Result<String>;
}

impl<T: TokenSource + ?Sized> TokenSource for Box<T> {
    fn access_token(&self) -> Result<String> {
        (**self).access_token()
    }
}

/// A fixed token supplied by the caller
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenSource for StaticToken {
    fn access_token(&self) -> Result<String> {
        if self.0.trim().is_empty() {
            anyhow::bail!("Access token is empty");
        }
        Ok(self.0.clone())
    }
}

/// Stored token data, as written by the sign-in flow
#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    access_token: String,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
}

/// Token read from a JSON file on every call
pub struct StoredTokenFile {
    path: PathBuf,
}

impl StoredTokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Token file in the default config directory (~/.config/courier/gmail-tokens.json)
    pub fn default_location() -> Result<Self> {
        let path = config::config_path(TOKEN_FILE).context("Could not determine config directory")?;
        Ok(Self::new(path))
    }

    fn load_token(&self) -> Result<StoredToken> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read token file: {}", self.path.display()))?;
        let token: StoredToken = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse token file: {}", self.path.display()))?;
        Ok(token)
    }
}

impl TokenSource for StoredTokenFile {
    fn access_token(&self) -> Result<String> {
        let token = self.load_token()?;

        if let Some(expires_at) = token.expires_at {
            let now = chrono::Utc::now().timestamp();
            if expires_at <= now + EXPIRY_BUFFER_SECS {
                anyhow::bail!(
                    "Stored access token expired; sign in again to refresh {}",
                    self.path.display()
                );
            }
        }

        Ok(token.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_token(dir: &tempfile::TempDir, expires_at: Option<i64>) -> PathBuf {
        let path = dir.path().join(TOKEN_FILE);
        let token = StoredToken {
            access_token: "ya29.test".to_string(),
            refresh_token: Some("1//refresh".to_string()),
            expires_at,
        };
        fs::write(&path, serde_json::to_string_pretty(&token).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_static_token() {
        assert_eq!(StaticToken::new("abc").access_token().unwrap(), "abc");
        assert!(StaticToken::new(" ").access_token().is_err());
    }

    #[test]
    fn test_stored_token_valid() {
        let dir = tempfile::tempdir().unwrap();
        let expires_at = chrono::Utc::now().timestamp() + 3600;
        let source = StoredTokenFile::new(write_token(&dir, Some(expires_at)));
        assert_eq!(source.access_token().unwrap(), "ya29.test");
    }

    #[test]
    fn test_stored_token_without_expiry() {
        let dir = tempfile::tempdir().unwrap();
        let source = StoredTokenFile::new(write_token(&dir, None));
        assert_eq!(source.access_token().unwrap(), "ya29.test");
    }

    #[test]
    fn test_stored_token_inside_buffer_is_expired() {
        let dir = tempfile::tempdir().unwrap();
        let expires_at = chrono::Utc::now().timestamp() + 60;
        let source = StoredTokenFile::new(write_token(&dir, Some(expires_at)));
        assert!(source.access_token().is_err());
    }

    #[test]
    fn test_missing_token_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = StoredTokenFile::new(dir.path().join("absent.json"));
        let err = source.access_token().unwrap_err();
        assert!(format!("{err}").contains("absent.json"));
    }
}
