//! Process configuration loaded from environment variables
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Poll interval and warm-up delay configurable via env
//! - 1.0.0: Initial creation with token and store path

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Default path of the reminder store file, relative to the working directory
pub const DEFAULT_REMINDERS_FILE: &str = "reminders.json";

/// Default seconds between reminder checks
pub const DEFAULT_POLL_SECS: u64 = 30;

/// Default seconds to wait after startup before the first reminder check
pub const DEFAULT_WARMUP_SECS: u64 = 10;

/// Runtime configuration for the bot process
///
/// All values come from the environment (a `.env` file is honored via
/// `dotenvy` in the binary). Only `DISCORD_TOKEN` is required; everything
/// else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot token used to authenticate to the Discord gateway
    pub discord_token: String,
    /// Path of the flat JSON file holding pending reminders
    pub reminders_file: PathBuf,
    /// Seconds between reminder checks
    pub poll_interval_secs: u64,
    /// Seconds to wait after startup before the first reminder check
    pub warmup_secs: u64,
    /// Default log filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        let discord_token = env::var("DISCORD_TOKEN")
            .context("DISCORD_TOKEN environment variable must be set")?;

        let reminders_file = env::var("REMINDERS_FILE")
            .unwrap_or_else(|_| DEFAULT_REMINDERS_FILE.to_string())
            .into();

        let poll_interval_secs = secs_from_env("REMINDER_POLL_SECS", DEFAULT_POLL_SECS)?;
        let warmup_secs = secs_from_env("REMINDER_WARMUP_SECS", DEFAULT_WARMUP_SECS)?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            discord_token,
            reminders_file,
            poll_interval_secs,
            warmup_secs,
            log_level,
        })
    }
}

/// Read a seconds value from an env var, falling back to a default when unset
fn secs_from_env(var: &str, default: u64) -> Result<u64> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{var} must be a whole number of seconds, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
