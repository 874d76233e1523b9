//! Startup configuration read from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8080` |
//! | `INDEX_FILE` | `static/index.html` |
//! | `CLASSIFIER_URL` | `https://ai.example.com` |
//! | `CLASSIFIER_TIMEOUT_MS` | `5000` |
//! | `CLASSIFIER_MIN_DELAY_MS` / `CLASSIFIER_MAX_DELAY_MS` | `10` / `500` (exclusive) |
//! | `LOG_FORMAT` | `text` (or `json`) |

use std::ops::Range;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use todo_core::classifier::DEFAULT_TIMEOUT;
use todo_core::client::DEFAULT_BASE_URL;
use todo_core::simulated::DEFAULT_DELAY_MS;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be a number, got `{value}`")]
    InvalidNumber { name: &'static str, value: String },
    #[error("LOG_FORMAT must be `text` or `json`, got `{0}`")]
    InvalidLogFormat(String),
    #[error("classifier delay range {min}..{max} is empty")]
    EmptyDelayRange { min: u64, max: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub index_file: PathBuf,
    pub classifier_url: String,
    pub classifier_timeout: Duration,
    pub classifier_delay_ms: Range<u64>,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            index_file: PathBuf::from("static/index.html"),
            classifier_url: DEFAULT_BASE_URL.to_string(),
            classifier_timeout: DEFAULT_TIMEOUT,
            classifier_delay_ms: DEFAULT_DELAY_MS,
            log_format: LogFormat::Text,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; unset keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let min = parse_or(&lookup, "CLASSIFIER_MIN_DELAY_MS", defaults.classifier_delay_ms.start)?;
        let max = parse_or(&lookup, "CLASSIFIER_MAX_DELAY_MS", defaults.classifier_delay_ms.end)?;
        if min >= max {
            return Err(ConfigError::EmptyDelayRange { min, max });
        }
        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => return Err(ConfigError::InvalidLogFormat(other.to_string())),
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            index_file: lookup("INDEX_FILE").map_or(defaults.index_file, PathBuf::from),
            classifier_url: lookup("CLASSIFIER_URL").unwrap_or(defaults.classifier_url),
            classifier_timeout: Duration::from_millis(parse_or(
                &lookup,
                "CLASSIFIER_TIMEOUT_MS",
                u64::try_from(defaults.classifier_timeout.as_millis()).unwrap_or(u64::MAX),
            )?),
            classifier_delay_ms: min..max,
            log_format,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.classifier_delay_ms, 10..500);
        assert_eq!(config.classifier_timeout, Duration::from_secs(5));
    }

    #[test]
    fn overrides_from_environment() {
        let config = config(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("INDEX_FILE", "/srv/index.html"),
            ("CLASSIFIER_URL", "http://localhost:9000"),
            ("CLASSIFIER_TIMEOUT_MS", "250"),
            ("CLASSIFIER_MIN_DELAY_MS", "0"),
            ("CLASSIFIER_MAX_DELAY_MS", "5"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.index_file, PathBuf::from("/srv/index.html"));
        assert_eq!(config.classifier_url, "http://localhost:9000");
        assert_eq!(config.classifier_timeout, Duration::from_millis(250));
        assert_eq!(config.classifier_delay_ms, 0..5);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_non_numeric_port() {
        let err = config(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                name: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn rejects_empty_delay_range() {
        let err = config(&[("CLASSIFIER_MIN_DELAY_MS", "500")]).unwrap_err();
        assert_eq!(err, ConfigError::EmptyDelayRange { min: 500, max: 500 });
    }

    #[test]
    fn rejects_unknown_log_format() {
        assert!(matches!(
            config(&[("LOG_FORMAT", "xml")]),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }
}
