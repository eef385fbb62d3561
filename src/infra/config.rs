//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. CONFIG_FILE environment variable
//! 3. Default: config/dev.toml
//!
//! Missing or malformed required configuration is the one fatal error in
//! this service: there is no sane default for a bot token or chat id.

use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

/// Which reference day a row's date must be strictly after to count as
/// "upcoming". The feed's consumers disagree on whether rows dated today
/// should still be announced, so the boundary is a named setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CutoffMode {
    /// Keep rows dated strictly after today (rows dated today are dropped).
    AfterToday,
    /// Keep rows dated strictly after yesterday (rows dated today are kept).
    AfterYesterday,
}

impl CutoffMode {
    /// Resolve the cutoff date for a given "today".
    pub fn cutoff_from(&self, today: NaiveDate) -> NaiveDate {
        match self {
            CutoffMode::AfterToday => today,
            CutoffMode::AfterYesterday => today.pred_opt().unwrap_or(today),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Google Sheet id, exported as CSV via the gviz endpoint
    pub sheet_id: String,
    #[serde(default = "default_feed_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_feed_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Group/class identifier, matched as a substring of the row's group cell
    pub group_id: String,
    /// HH:MM check points; the pipeline fires once per matching minute
    #[serde(default = "default_check_times")]
    pub check_times: Vec<String>,
    #[serde(default = "default_cutoff")]
    pub cutoff: CutoffMode,
    /// Literal in column 6 that marks a row as a cancellation
    #[serde(default = "default_cancel_marker")]
    pub cancel_marker: String,
}

fn default_check_times() -> Vec<String> {
    vec!["06:00".to_string(), "12:00".to_string(), "18:00".to_string()]
}

fn default_cutoff() -> CutoffMode {
    CutoffMode::AfterToday
}

fn default_cancel_marker() -> String {
    "отмена".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    pub telegram: TelegramConfig,
    pub feed: FeedConfig,
    pub schedule: ScheduleConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    bot_token: String,
    chat_id: String,
    sheet_id: String,
    feed_timeout_ms: u64,
    group_id: String,
    check_times: Vec<String>,
    cutoff: CutoffMode,
    cancel_marker: String,
    config_file: String,
}

impl Config {
    /// Determine config file path from an optional CLI override, the
    /// CONFIG_FILE environment variable, or the default.
    pub fn resolve_config_path(cli_path: Option<&str>) -> String {
        if let Some(path) = cli_path {
            return path.to_string();
        }

        if let Ok(path) = env::var("CONFIG_FILE") {
            return path;
        }

        "config/dev.toml".to_string()
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self {
            bot_token: toml_config.telegram.bot_token,
            chat_id: toml_config.telegram.chat_id,
            sheet_id: toml_config.feed.sheet_id,
            feed_timeout_ms: toml_config.feed.timeout_ms,
            group_id: toml_config.schedule.group_id,
            check_times: toml_config.schedule.check_times,
            cutoff: toml_config.schedule.cutoff,
            cancel_marker: toml_config.schedule.cancel_marker,
            config_file: path.display().to_string(),
        })
    }

    // Getters for all config fields
    pub fn bot_token(&self) -> &str {
        &self.bot_token
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    pub fn sheet_id(&self) -> &str {
        &self.sheet_id
    }

    pub fn feed_timeout_ms(&self) -> u64 {
        self.feed_timeout_ms
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn check_times(&self) -> &[String] {
        &self.check_times
    }

    pub fn cutoff(&self) -> CutoffMode {
        self.cutoff
    }

    pub fn cancel_marker(&self) -> &str {
        &self.cancel_marker
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Self {
            bot_token: "test-token".to_string(),
            chat_id: "test-chat".to_string(),
            sheet_id: "test-sheet".to_string(),
            feed_timeout_ms: default_feed_timeout_ms(),
            group_id: "7A".to_string(),
            check_times: default_check_times(),
            cutoff: default_cutoff(),
            cancel_marker: default_cancel_marker(),
            config_file: "default".to_string(),
        }
    }
}

#[cfg(test)]
impl Config {
    /// Builder method for tests to set the target group
    pub fn with_group_id(mut self, group_id: &str) -> Self {
        self.group_id = group_id.to_string();
        self
    }

    /// Builder method for tests to set the cutoff policy
    pub fn with_cutoff(mut self, cutoff: CutoffMode) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Builder method for tests to set the cancellation marker
    pub fn with_cancel_marker(mut self, marker: &str) -> Self {
        self.cancel_marker = marker.to_string();
        self
    }
}
