//! Environment-based configuration.
//!
//! Every channel, role, and threshold the workflows use is injected from here rather
//! than hardcoded, so a test server and the live server differ only in their `.env`.

use std::str::FromStr;
use std::time::Duration;

use crate::error::{config::ConfigError, AppError};

/// Outbound notification destinations (Discord channel IDs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destinations {
    pub report_log: u64,
    pub staff_alert: u64,
    pub commendations: u64,
    pub zeus_feedback: u64,
}

/// Role IDs referenced by authorization checks and pings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleIds {
    pub unit_staff: u64,
    pub curator: u64,
    pub advisor: u64,
    pub zeus: u64,
    pub zeus_in_training: u64,
}

/// Counts that trigger escalation, promotion, or rate limiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thresholds {
    /// Operations a candidate attends before promotion.
    pub total_operations: u32,
    /// No-shows that trigger a staff escalation.
    pub no_show: u32,
    /// Bonuses a recipient can receive in a rolling 24 hours.
    pub bonus_daily_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSettings {
    /// Phrase that marks an attendance announcement (matched case-insensitively).
    pub keyword: String,
    /// Number of recent messages scanned per tracking request.
    pub history_limit: usize,
    /// Announcements newer than this block another tracking request.
    pub dedup_window: chrono::Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusSettings {
    /// Smallest award, in cents.
    pub min_cents: u64,
    /// Largest award, in cents (inclusive).
    pub max_cents: u64,
}

pub struct Config {
    pub discord_bot_token: String,
    pub database_url: String,
    pub guild_id: u64,

    pub destinations: Destinations,
    pub roles: RoleIds,
    pub thresholds: Thresholds,
    pub candidate: CandidateSettings,
    pub bonus: BonusSettings,

    /// How long a failed incident report submission is kept for pre-filling.
    pub draft_retention: Duration,
    /// How long a form may stay open before it is discarded.
    pub form_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            database_url: required("DATABASE_URL")?,
            guild_id: required_parsed("DISCORD_GUILD_ID")?,
            destinations: Destinations {
                report_log: required_parsed("REPORT_LOG_CHANNEL_ID")?,
                staff_alert: required_parsed("UNIT_STAFF_CHANNEL_ID")?,
                commendations: required_parsed("COMMENDATIONS_CHANNEL_ID")?,
                zeus_feedback: required_parsed("ZEUS_FEEDBACK_CHANNEL_ID")?,
            },
            roles: RoleIds {
                unit_staff: required_parsed("UNIT_STAFF_ROLE_ID")?,
                curator: required_parsed("CURATOR_ROLE_ID")?,
                advisor: required_parsed("ADVISOR_ROLE_ID")?,
                zeus: required_parsed("ZEUS_ROLE_ID")?,
                zeus_in_training: required_parsed("ZEUS_IN_TRAINING_ROLE_ID")?,
            },
            thresholds: Thresholds {
                total_operations: optional_parsed("TOTAL_OPERATIONS", 3)?,
                no_show: optional_parsed("NO_SHOW_THRESHOLD", 3)?,
                bonus_daily_limit: optional_parsed("BONUS_DAILY_LIMIT", 3)?,
            },
            candidate: CandidateSettings {
                keyword: std::env::var("OPERATION_KEYWORD")
                    .unwrap_or_else(|_| "has attended an operation".to_string()),
                history_limit: optional_parsed("CANDIDATE_HISTORY_LIMIT", 1000)?,
                dedup_window: dedup_window(optional_parsed("CANDIDATE_DEDUP_SECONDS", 3600)?)?,
            },
            bonus: bonus_settings()?,
            draft_retention: Duration::from_secs(optional_parsed("DRAFT_RETENTION_SECONDS", 900)?),
            form_timeout: Duration::from_secs(optional_parsed("FORM_TIMEOUT_SECONDS", 300)?),
        })
    }
}

fn bonus_settings() -> Result<BonusSettings, ConfigError> {
    let min_cents = optional_parsed("BONUS_MIN_CENTS", 100_000)?;
    let max_cents = optional_parsed("BONUS_MAX_CENTS", 1_000_099)?;

    if min_cents == 0 || min_cents > max_cents {
        return Err(ConfigError::InvalidEnvVar {
            name: "BONUS_MIN_CENTS".to_string(),
            value: min_cents.to_string(),
            reason: format!("must be non-zero and not above BONUS_MAX_CENTS ({})", max_cents),
        });
    }

    Ok(BonusSettings {
        min_cents,
        max_cents,
    })
}

/// Validates the candidate de-duplication window, given in seconds.
fn dedup_window(seconds: i64) -> Result<chrono::Duration, ConfigError> {
    chrono::Duration::try_seconds(seconds)
        .filter(|window| *window >= chrono::Duration::zero())
        .ok_or_else(|| ConfigError::InvalidEnvVar {
            name: "CANDIDATE_DEDUP_SECONDS".to_string(),
            value: seconds.to_string(),
            reason: "must be a non-negative number of seconds within chrono's range".to_string(),
        })
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn required_parsed<T>(name: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse(name, required(name)?)
}

fn optional_parsed<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => parse(name, value),
        Err(_) => Ok(default),
    }
}

fn parse<T>(name: &str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: e.to_string(),
            value,
        })
}
