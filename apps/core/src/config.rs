//! Runtime configuration read from the environment (and an optional `.env`).

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use validator::Validate;

use crate::brain::insights::DEFAULT_INSIGHT_CAP;
use crate::error::{AppError, Result};
use crate::tracker::{RetentionPolicy, DEFAULT_HISTORY_LIMIT};

pub const DATA_DIR_VAR: &str = "MOODBOOST_DATA_DIR";
pub const HISTORY_LIMIT_VAR: &str = "MOODBOOST_HISTORY_LIMIT";
pub const INSIGHT_CAP_VAR: &str = "MOODBOOST_INSIGHT_CAP";
pub const LOG_FORMAT_VAR: &str = "MOODBOOST_LOG_FORMAT";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("Unknown log format: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MoodConfig {
    /// Root of the on-disk store.
    pub data_dir: PathBuf,
    /// Entries kept in each history list of the profile.
    #[validate(range(min = 10, max = 10000))]
    pub history_limit: usize,
    /// Insights kept in the feed.
    #[validate(range(min = 1, max = 100))]
    pub insight_cap: usize,
    pub log_format: LogFormat,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            history_limit: DEFAULT_HISTORY_LIMIT,
            insight_cap: DEFAULT_INSIGHT_CAP,
            log_format: LogFormat::Pretty,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {}", name, raw))),
        _ => Ok(default),
    }
}

impl MoodConfig {
    /// Reads the configuration, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let defaults = Self::default();
        let config = Self {
            data_dir: env::var(DATA_DIR_VAR)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            history_limit: parse_var(HISTORY_LIMIT_VAR, defaults.history_limit)?,
            insight_cap: parse_var(INSIGHT_CAP_VAR, defaults.insight_cap)?,
            log_format: match env::var(LOG_FORMAT_VAR) {
                Ok(raw) if !raw.trim().is_empty() => raw.parse()?,
                _ => defaults.log_format,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn retention(&self) -> RetentionPolicy {
        RetentionPolicy::new(self.history_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 4] = [DATA_DIR_VAR, HISTORY_LIMIT_VAR, INSIGHT_CAP_VAR, LOG_FORMAT_VAR];

    #[test]
    fn test_defaults_when_unset() {
        temp_env::with_vars_unset(ALL_VARS, || {
            let config = MoodConfig::from_env().unwrap();
            assert_eq!(config.history_limit, 500);
            assert_eq!(config.insight_cap, 10);
            assert_eq!(config.log_format, LogFormat::Pretty);
            assert_eq!(config.data_dir, PathBuf::from("./data"));
        });
    }

    #[test]
    fn test_reads_overrides() {
        temp_env::with_vars(
            [
                (DATA_DIR_VAR, Some("/tmp/moodboost")),
                (HISTORY_LIMIT_VAR, Some("250")),
                (INSIGHT_CAP_VAR, Some("5")),
                (LOG_FORMAT_VAR, Some("JSON")),
            ],
            || {
                let config = MoodConfig::from_env().unwrap();
                assert_eq!(config.data_dir, PathBuf::from("/tmp/moodboost"));
                assert_eq!(config.history_limit, 250);
                assert_eq!(config.retention().max_entries, 250);
                assert_eq!(config.insight_cap, 5);
                assert_eq!(config.log_format, LogFormat::Json);
            },
        );
    }

    #[test]
    fn test_unparseable_is_config_error() {
        temp_env::with_var(HISTORY_LIMIT_VAR, Some("lots"), || {
            let err = MoodConfig::from_env().unwrap_err();
            assert!(matches!(err, AppError::Config(_)));
        });

        temp_env::with_var(LOG_FORMAT_VAR, Some("xml"), || {
            let err = MoodConfig::from_env().unwrap_err();
            assert!(matches!(err, AppError::Config(_)));
        });
    }

    #[test]
    fn test_out_of_range_is_validation_error() {
        temp_env::with_var(INSIGHT_CAP_VAR, Some("0"), || {
            let err = MoodConfig::from_env().unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        });

        temp_env::with_var(HISTORY_LIMIT_VAR, Some("5"), || {
            let err = MoodConfig::from_env().unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        });
    }
}
