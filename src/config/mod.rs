//
//  xbl-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Client configuration stored as TOML in the platform-specific configuration
//! directory. Every key is optional; a missing file means defaults.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/xbl/config.toml`
//! - **macOS**: `~/Library/Application Support/xbl/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\xbl\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [http]
//! timeout_secs = 30
//! accept_language = "en-GB"
//! contract_version = 2
//!
//! [endpoints]
//! presence = "https://userpresence.xboxlive.com"
//! social = "http://localhost:8080"
//! ```
//!
//! Endpoint overrides exist for testing and proxying; each value is the
//! absolute base URL of one service.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Top-level client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// HTTP behavior shared by all requests.
    #[serde(default)]
    pub http: HttpConfig,

    /// Base URL of every upstream service.
    #[serde(default)]
    pub endpoints: Endpoints,
}

/// HTTP settings applied to every request the client makes.
///
/// # Default Values
///
/// | Field | Default |
/// |-------|---------|
/// | `timeout_secs` | `None` (no client-imposed timeout) |
/// | `user_agent` | `"xbl/<version>"` |
/// | `accept_language` | `"en-US"` |
/// | `contract_version` | `2` |
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HttpConfig {
    /// Client-wide request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// User-Agent header value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Value of the `accept-language` default header.
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Value of the `x-xbl-contract-version` default header.
    ///
    /// Some presence operations pin their own version regardless of this.
    #[serde(default = "default_contract_version")]
    pub contract_version: u32,
}

fn default_user_agent() -> String {
    format!("xbl/{}", crate::VERSION)
}

fn default_accept_language() -> String {
    "en-US".to_string()
}

fn default_contract_version() -> u32 {
    2
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            contract_version: default_contract_version(),
        }
    }
}

impl HttpConfig {
    /// The configured timeout as a [`Duration`].
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Absolute base URL of each upstream Xbox Live service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Endpoints {
    /// `profile.xboxlive.com`
    pub profile: String,
    /// `achievements.xboxlive.com`
    pub achievements: String,
    /// `userpresence.xboxlive.com`
    pub presence: String,
    /// `multiplayeractivity.xboxlive.com`
    pub multiplayer: String,
    /// `social.xboxlive.com`
    pub social: String,
    /// `clubhub.xboxlive.com`
    pub clubhub: String,
    /// `chatfd.xboxlive.com`
    pub chat: String,
    /// `avty.xboxlive.com`
    pub activity: String,
    /// `userposts.xboxlive.com`
    pub userposts: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            profile: "https://profile.xboxlive.com".to_string(),
            achievements: "https://achievements.xboxlive.com".to_string(),
            presence: "https://userpresence.xboxlive.com".to_string(),
            multiplayer: "https://multiplayeractivity.xboxlive.com".to_string(),
            social: "https://social.xboxlive.com".to_string(),
            clubhub: "https://clubhub.xboxlive.com".to_string(),
            chat: "https://chatfd.xboxlive.com".to_string(),
            activity: "https://avty.xboxlive.com".to_string(),
            userposts: "https://userposts.xboxlive.com".to_string(),
        }
    }
}

impl Endpoints {
    /// Points every service at the same base URL.
    ///
    /// Useful for local proxies and mock servers.
    pub fn all(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            profile: base.clone(),
            achievements: base.clone(),
            presence: base.clone(),
            multiplayer: base.clone(),
            social: base.clone(),
            clubhub: base.clone(),
            chat: base.clone(),
            activity: base.clone(),
            userposts: base,
        }
    }
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// A missing file is not an error; defaults are used.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.http.accept_language, "en-US");
        assert_eq!(config.http.contract_version, 2);
        assert!(config.http.timeout().is_none());
        assert_eq!(config.endpoints.presence, "https://userpresence.xboxlive.com");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [http]
            timeout_secs = 15

            [endpoints]
            social = "http://127.0.0.1:9000"
            "#,
        )
        .unwrap();

        assert_eq!(config.http.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.http.accept_language, "en-US");
        assert_eq!(config.endpoints.social, "http://127.0.0.1:9000");
        assert_eq!(config.endpoints.profile, "https://profile.xboxlive.com");
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[http\ntimeout_secs = ").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn test_endpoints_all() {
        let endpoints = Endpoints::all("http://127.0.0.1:1234/");
        assert_eq!(endpoints.clubhub, "http://127.0.0.1:1234");
        assert_eq!(endpoints.userposts, "http://127.0.0.1:1234");
    }
}
