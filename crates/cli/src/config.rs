// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `rhsync` configuration.
//!
//! Read from `$XDG_CONFIG_HOME/reporthub/config.toml` unless `--config` or
//! `RHSYNC_CONFIG` points elsewhere. A missing default file means defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rh_sync::{ManagerConfig, NotFoundPolicy, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

use crate::env;
use crate::error::{Error, Result};

/// Directory name under the XDG config and data roots.
pub const APP_DIR_NAME: &str = "reporthub";

/// Config file name within [`APP_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Store file name within the data directory.
pub const STORE_FILE_NAME: &str = "offline.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the ReportHub REST API.
    pub api_base_url: String,

    /// WebSocket URL of the chat channel. Without it, queued messages wait.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,

    pub drain_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub probe_interval_secs: u64,

    /// What to do with actions whose target the server no longer has.
    pub not_found: NotFoundPolicy,

    /// File holding the bearer token. Takes precedence over `token_env`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_file: Option<PathBuf>,

    /// Environment variable holding the bearer token.
    pub token_env: String,

    /// Marker file written while offline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator_file: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            channel_url: None,
            store_path: None,
            drain_interval_secs: 30,
            request_timeout_secs: 15,
            probe_interval_secs: 10,
            not_found: NotFoundPolicy::Keep,
            token_file: None,
            token_env: env::default_token_var().to_string(),
            indicator_file: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path (flag or environment) must exist. The default path
    /// may be absent, in which case defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let explicit = explicit.map(Path::to_path_buf).or_else(env::config_path);
        let config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::ConfigNotFound(path.display().to_string()));
                }
                Self::from_file(&path)?
            }
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Config::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        Self::parse(&content)
    }

    /// Parse config text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }

    fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(Error::Config("api_base_url cannot be empty".to_string()));
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(Error::Config(format!(
                "api_base_url must start with http:// or https:// (got '{}')",
                self.api_base_url
            )));
        }
        if let Some(url) = &self.channel_url {
            if !url.starts_with("ws://") && !url.starts_with("wss://") {
                return Err(Error::Config(format!(
                    "channel_url must start with ws:// or wss:// (got '{}')",
                    url
                )));
            }
        }
        for (field, value) in [
            ("drain_interval_secs", self.drain_interval_secs),
            ("request_timeout_secs", self.request_timeout_secs),
            ("probe_interval_secs", self.probe_interval_secs),
        ] {
            if value == 0 {
                return Err(Error::Config(format!("{} must be greater than 0", field)));
            }
        }
        Ok(())
    }

    /// Resolved store location.
    pub fn store_path(&self) -> PathBuf {
        match &self.store_path {
            Some(path) => expand_home(path),
            None => dirs::data_dir()
                .map(|d| d.join(APP_DIR_NAME))
                .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR_NAME))
                .join(STORE_FILE_NAME),
        }
    }

    pub fn token_file(&self) -> Option<PathBuf> {
        self.token_file.as_deref().map(expand_home)
    }

    pub fn indicator_file(&self) -> Option<PathBuf> {
        self.indicator_file.as_deref().map(expand_home)
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_file.as_deref().map(expand_home)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.probe_interval_secs)
    }

    pub fn manager_config(&self) -> ManagerConfig {
        ManagerConfig {
            drain_interval: Duration::from_secs(self.drain_interval_secs),
            not_found: self.not_found,
        }
    }
}

/// Default config file location.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
