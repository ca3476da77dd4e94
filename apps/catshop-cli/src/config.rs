//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//! Command-line flags take precedence over anything loaded here.

use std::env;

use chrono::{DateTime, Utc};

/// Default tracing filter when `CATSHOP_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Tracing filter directive (`CATSHOP_LOG`)
    pub log_filter: String,

    /// Price carts as of this instant instead of the wall clock (`CATSHOP_NOW`)
    pub fixed_now: Option<DateTime<Utc>>,

    /// Pretty-print JSON output (`CATSHOP_PRETTY`)
    pub pretty_json: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            fixed_now: None,
            pretty_json: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = CliConfig {
            log_filter: lookup("CATSHOP_LOG")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),

            fixed_now: lookup("CATSHOP_NOW")
                .map(|v| {
                    DateTime::parse_from_rfc3339(v.trim())
                        .map(|t| t.with_timezone(&Utc))
                        .map_err(|_| ConfigError::InvalidValue {
                            key: "CATSHOP_NOW".to_string(),
                            value: v,
                        })
                })
                .transpose()?,

            pretty_json: match lookup("CATSHOP_PRETTY") {
                None => false,
                Some(v) => v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: "CATSHOP_PRETTY".to_string(),
                    value: v,
                })?,
            },
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_lookup(lookup_in(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_reads_all_variables() {
        let config = CliConfig::from_lookup(lookup_in(&[
            ("CATSHOP_LOG", "catshop_core=debug"),
            ("CATSHOP_NOW", "2025-01-01T09:00:00+09:00"),
            ("CATSHOP_PRETTY", "true"),
        ]))
        .unwrap();

        assert_eq!(config.log_filter, "catshop_core=debug");
        assert_eq!(
            config.fixed_now,
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
        );
        assert!(config.pretty_json);
    }

    #[test]
    fn test_blank_log_filter_falls_back() {
        let config = CliConfig::from_lookup(lookup_in(&[("CATSHOP_LOG", "  ")])).unwrap();
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_invalid_values() {
        let err = CliConfig::from_lookup(lookup_in(&[("CATSHOP_NOW", "tomorrow")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for CATSHOP_NOW: 'tomorrow'");

        let err = CliConfig::from_lookup(lookup_in(&[("CATSHOP_PRETTY", "yes")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == "CATSHOP_PRETTY"));
    }
}
