//! Configuration file handling.
//!
//! The configuration is a single JSON file (by default
//! `~/.config/ynab-monitor/config.json`) holding the YNAB credentials, the
//! monitored account, the projection window and threshold, the notification
//! channels and the optional run schedules.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::model::Amount;
use crate::notify::ChannelConfig;
use crate::schedule::Schedule;
use crate::Result;

const DEFAULT_BUDGET_ID: &str = "last-used";

/// The validated runtime configuration. Instantiate it with [`Config::load`],
/// which reads and validates the JSON file and pre-parses the schedule
/// strings so that a bad configuration fails at startup, not mid-cycle.
#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    file: ConfigFile,
    schedule: Option<Schedule>,
    update_schedule: Option<Schedule>,
}

impl Config {
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = ConfigFile::load(&path).await?;

        ensure!(!file.api_token.is_empty(), "api_token is required");
        ensure!(!file.account_id.is_empty(), "account_id is required");
        ensure!(
            !file.channels.is_empty(),
            "At least one notification channel is required"
        );
        if let Some(update_channels) = &file.update_channels {
            ensure!(
                !update_channels.is_empty(),
                "update_channels must not be empty when present"
            );
        }

        let schedule = parse_schedule(file.schedule.as_deref(), "schedule")?;
        let update_schedule = parse_schedule(file.update_schedule.as_deref(), "update_schedule")?;

        Ok(Self {
            path,
            file,
            schedule,
            update_schedule,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn api_token(&self) -> &str {
        &self.file.api_token
    }

    pub fn budget_id(&self) -> &str {
        &self.file.budget_id
    }

    pub fn account_id(&self) -> &str {
        &self.file.account_id
    }

    /// The category allow-list for credit-card reconciliation; empty means
    /// every category in the credit-card payments group.
    pub fn cc_categories(&self) -> &[String] {
        &self.file.cc_categories
    }

    /// The minimum-balance floor, in whole currency units.
    pub fn threshold(&self) -> Amount {
        Amount::from_units(self.file.min_balance)
    }

    /// The projection window end for a cycle starting on `today`: a fixed
    /// number of days when configured, otherwise the end of the current
    /// month.
    pub fn window_end(&self, today: NaiveDate) -> NaiveDate {
        match self.file.monitor_days {
            Some(days) => today + Days::new(days),
            None => calendar::end_of_month(today),
        }
    }

    pub fn channels(&self) -> &[ChannelConfig] {
        &self.file.channels
    }

    /// Channels for routine update notifications; defaults to the alert
    /// channels when not configured separately.
    pub fn update_channels(&self) -> &[ChannelConfig] {
        self.file
            .update_channels
            .as_deref()
            .unwrap_or(&self.file.channels)
    }

    pub fn schedule(&self) -> Option<Schedule> {
        self.schedule
    }

    pub fn update_schedule(&self) -> Option<Schedule> {
        self.update_schedule
    }
}

fn parse_schedule(value: Option<&str>, field: &str) -> Result<Option<Schedule>> {
    match value {
        None => Ok(None),
        Some(s) => {
            let schedule = s
                .parse::<Schedule>()
                .with_context(|| format!("Invalid {field} in config file"))?;
            Ok(Some(schedule))
        }
    }
}

/// Represents the serialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "api_token": "abcdef0123456789",
///   "budget_id": "last-used",
///   "account_id": "f2a7c1e9-3b54-4d08-9c6e-1a8b5d7f0e23",
///   "cc_categories": [],
///   "monitor_days": 30,
///   "min_balance": 500,
///   "channels": [{"kind": "ntfy", "url": "https://ntfy.sh/my-balance"}],
///   "schedule": "08:00",
///   "update_schedule": "12h"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// YNAB personal access token.
    api_token: String,

    /// YNAB budget id; "last-used" selects the most recently used budget.
    #[serde(default = "default_budget_id")]
    budget_id: String,

    /// The id of the account whose balance is projected.
    account_id: String,

    /// Credit-card payment categories to consider, by id or name.
    /// Empty means all of them.
    #[serde(default)]
    cc_categories: Vec<String>,

    /// Project this many days forward. Absent means through the end of the
    /// current month.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    monitor_days: Option<u64>,

    /// Alert when the projected minimum drops below this many whole
    /// currency units.
    #[serde(default)]
    min_balance: i64,

    /// Channels that receive threshold alerts.
    channels: Vec<ChannelConfig>,

    /// Channels that receive routine updates; defaults to `channels`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    update_channels: Option<Vec<ChannelConfig>>,

    /// When to run check cycles in watch mode: "HH:MM" or "Nh".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schedule: Option<String>,

    /// When to send routine update notifications in watch mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    update_schedule: Option<String>,
}

fn default_budget_id() -> String {
    DEFAULT_BUDGET_ID.to_string()
}

impl ConfigFile {
    async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn write_and_load(json: &str) -> Result<Config> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, json).await.unwrap();
        Config::load(&path).await
    }

    fn full_config_json() -> &'static str {
        r#"{
            "api_token": "token123",
            "account_id": "acct-1",
            "cc_categories": ["Visa"],
            "monitor_days": 14,
            "min_balance": 500,
            "channels": [{"kind": "ntfy", "url": "https://ntfy.sh/balance"}],
            "update_channels": [{"kind": "webhook", "url": "https://example.com/hook"}],
            "schedule": "08:00",
            "update_schedule": "12h"
        }"#
    }

    #[tokio::test]
    async fn test_load_full_config() {
        let config = write_and_load(full_config_json()).await.unwrap();
        assert_eq!(config.api_token(), "token123");
        assert_eq!(config.budget_id(), "last-used");
        assert_eq!(config.account_id(), "acct-1");
        assert_eq!(config.cc_categories(), &["Visa".to_string()]);
        assert_eq!(config.threshold(), Amount::from_units(500));
        assert_eq!(
            config.schedule(),
            Some(Schedule::Daily { hour: 8, minute: 0 })
        );
        assert_eq!(
            config.update_schedule(),
            Some(Schedule::Interval(chrono::Duration::hours(12)))
        );
        assert_eq!(
            config.update_channels(),
            &[ChannelConfig::Webhook {
                url: "https://example.com/hook".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_minimal_config_defaults() {
        let config = write_and_load(
            r#"{
                "api_token": "t",
                "account_id": "a",
                "channels": [{"kind": "ntfy", "url": "https://ntfy.sh/x"}]
            }"#,
        )
        .await
        .unwrap();
        assert_eq!(config.budget_id(), "last-used");
        assert!(config.cc_categories().is_empty());
        assert_eq!(config.threshold(), Amount::from_units(0));
        assert!(config.schedule().is_none());
        assert!(config.update_schedule().is_none());
        // Updates fall back to the alert channels.
        assert_eq!(config.update_channels(), config.channels());
    }

    #[tokio::test]
    async fn test_window_end_with_monitor_days() {
        let config = write_and_load(full_config_json()).await.unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 8, 26).unwrap();
        assert_eq!(
            config.window_end(today),
            NaiveDate::from_ymd_opt(2025, 9, 9).unwrap()
        );
    }

    #[tokio::test]
    async fn test_window_end_defaults_to_end_of_month() {
        let config = write_and_load(
            r#"{
                "api_token": "t",
                "account_id": "a",
                "channels": [{"kind": "ntfy", "url": "https://ntfy.sh/x"}]
            }"#,
        )
        .await
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        assert_eq!(
            config.window_end(today),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[tokio::test]
    async fn test_missing_api_token_fails() {
        let result = write_and_load(
            r#"{
                "api_token": "",
                "account_id": "a",
                "channels": [{"kind": "ntfy", "url": "https://ntfy.sh/x"}]
            }"#,
        )
        .await;
        assert!(result.unwrap_err().to_string().contains("api_token"));
    }

    #[tokio::test]
    async fn test_empty_channels_fails() {
        let result = write_and_load(
            r#"{"api_token": "t", "account_id": "a", "channels": []}"#,
        )
        .await;
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("notification channel"));
    }

    #[tokio::test]
    async fn test_bad_schedule_fails_at_load() {
        let result = write_and_load(
            r#"{
                "api_token": "t",
                "account_id": "a",
                "channels": [{"kind": "ntfy", "url": "https://ntfy.sh/x"}],
                "schedule": "8am"
            }"#,
        )
        .await;
        assert!(result.unwrap_err().to_string().contains("schedule"));
    }

    #[tokio::test]
    async fn test_missing_file_fails_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.json");
        let err = Config::load(&path).await.unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }
}
