use std::str::FromStr;
use std::time::Duration;

use crate::error::{config::ConfigError, AppError};

const DEFAULT_SNAPSHOT_DIR: &str = "snapshots";
/// Every day at 04:00 UTC.
const DEFAULT_SNAPSHOT_CRON: &str = "0 0 4 * * *";
const DEFAULT_RESTORE_CALL_DELAY_MS: u64 = 1000;
const DEFAULT_CONFIRMATION_WINDOW_SECONDS: u64 = 180;

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    /// Directory snapshot artifacts are written to.
    pub snapshot_dir: String,
    /// Cron expression for scheduled snapshots (with seconds field).
    pub snapshot_cron: String,
    /// Artifacts older than this many days are pruned after each save. `None` keeps all.
    pub snapshot_retention_days: Option<u32>,

    /// Delay after each remote call during capture and restore.
    pub restore_call_delay: Duration,
    /// How long a restore request waits for confirmation.
    pub confirmation_window: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let restore_call_delay_ms = parse_var(
            "RESTORE_CALL_DELAY_MS",
            std::env::var("RESTORE_CALL_DELAY_MS").ok(),
        )?
        .unwrap_or(DEFAULT_RESTORE_CALL_DELAY_MS);
        let confirmation_window_seconds = parse_var(
            "CONFIRMATION_WINDOW_SECONDS",
            std::env::var("CONFIRMATION_WINDOW_SECONDS").ok(),
        )?
        .unwrap_or(DEFAULT_CONFIRMATION_WINDOW_SECONDS);

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            snapshot_dir: std::env::var("SNAPSHOT_DIR")
                .unwrap_or_else(|_| DEFAULT_SNAPSHOT_DIR.to_string()),
            snapshot_cron: std::env::var("SNAPSHOT_CRON")
                .unwrap_or_else(|_| DEFAULT_SNAPSHOT_CRON.to_string()),
            snapshot_retention_days: parse_var(
                "SNAPSHOT_RETENTION_DAYS",
                std::env::var("SNAPSHOT_RETENTION_DAYS").ok(),
            )?,
            restore_call_delay: Duration::from_millis(restore_call_delay_ms),
            confirmation_window: Duration::from_secs(confirmation_window_seconds),
        })
    }
}

/// Parses an optional environment variable value.
///
/// # Returns
/// - `Ok(None)` - Variable not set or empty
/// - `Ok(Some(T))` - Parsed value
/// - `Err(ConfigError::InvalidEnvVar)` - Value set but not parseable as `T`
fn parse_var<T: FromStr>(name: &str, value: Option<String>) -> Result<Option<T>, ConfigError> {
    let Some(value) = value.filter(|value| !value.trim().is_empty()) else {
        return Ok(None);
    };

    value
        .trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        })
}
