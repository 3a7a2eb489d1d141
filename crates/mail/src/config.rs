//! Configuration loading for the ReachInbox client
//!
//! Settings are resolved in order of priority:
//! 1. Runtime environment variables
//! 2. JSON file (~/.config/reachinbox/reachinbox.json)
//! 3. Built-in defaults

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::state::FallbackPolicy;

/// Settings filename in the ReachInbox config directory
const SETTINGS_FILE: &str = "reachinbox.json";

pub const DEFAULT_API_BASE_URL: &str = "https://hiring.reachinbox.xyz/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REPLY_FROM: &str = "user@example.com";

const ENV_API_URL: &str = "REACHINBOX_API_URL";
const ENV_TIMEOUT: &str = "REACHINBOX_TIMEOUT_SECS";
const ENV_MOCK_FALLBACK: &str = "REACHINBOX_MOCK_FALLBACK";

/// Client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Base URL of the mail-aggregation API
    pub api_base_url: String,
    /// Whole-request timeout
    pub timeout_secs: u64,
    /// Serve demo threads when listing fails instead of surfacing the error
    pub mock_fallback: bool,
    /// Sender used for replies when no user is signed in
    pub reply_from: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            mock_fallback: true,
            reply_from: DEFAULT_REPLY_FROM.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load settings using the following priority:
    /// 1. Runtime environment variables
    /// 2. JSON file (~/.config/reachinbox/reachinbox.json)
    /// 3. Defaults
    pub fn load() -> Result<Self> {
        let mut settings = if config::config_exists(SETTINGS_FILE) {
            config::load_json(SETTINGS_FILE)?
        } else {
            Self::default()
        };

        settings.apply_overrides(|key| std::env::var(key).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let settings: Self = config::load_json_file(path)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a JSON string; missing keys take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json).context("Failed to parse settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings no request could succeed with
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            anyhow::bail!("timeoutSecs must be at least 1 second");
        }
        if self.api_base_url.trim().is_empty() {
            anyhow::bail!("apiBaseUrl must not be empty");
        }
        Ok(())
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.api_base_url = url;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT) {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", ENV_TIMEOUT))?;
            if secs == 0 {
                anyhow::bail!("{} must be at least 1", ENV_TIMEOUT);
            }
            self.timeout_secs = secs;
        }

        if let Some(raw) = lookup(ENV_MOCK_FALLBACK) {
            self.mock_fallback = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => anyhow::bail!("{} has invalid value: {}", ENV_MOCK_FALLBACK, other),
            };
        }

        Ok(())
    }

    /// How the thread cache should react to failed reads
    pub fn fallback_policy(&self) -> FallbackPolicy {
        if self.mock_fallback {
            FallbackPolicy::MockData
        } else {
            FallbackPolicy::Surface
        }
    }

    /// Get the default settings file path (~/.config/reachinbox/reachinbox.json)
    pub fn default_settings_path() -> Option<PathBuf> {
        config::config_path(SETTINGS_FILE)
    }
}
