//! Configuration loading for hrdesk.
//!
//! Loads layered `.env` files and environment variables prefixed with
//! `HRDESK_`, producing a typed [`AppConfig`].

use std::{collections::BTreeMap, env, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::latency::OperationClass;

/// Upper bound for any single artificial delay
pub const MAX_LATENCY_MS: u64 = 10_000;

const KNOWN_LOG_FORMATS: &[&str] = &["json", "pretty"];

/// Application configuration derived from `HRDESK_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AppConfig {
    #[serde(default = "default_profile")]
    pub profile: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
    /// Directory holding fixture overrides; embedded fixtures are used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixtures_dir: Option<PathBuf>,
    #[serde(default)]
    pub latency: LatencyConfig,
}

/// Artificial latency per operation class, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct LatencyConfig {
    /// Environment variable: `HRDESK_LATENCY_ENABLED`
    #[serde(default = "default_latency_enabled")]
    pub enabled: bool,
    /// Environment variable: `HRDESK_LATENCY_LIST_MS`
    #[serde(default = "default_latency_list_ms")]
    pub list_ms: u64,
    /// Environment variable: `HRDESK_LATENCY_FETCH_MS`
    #[serde(default = "default_latency_fetch_ms")]
    pub fetch_ms: u64,
    /// Environment variable: `HRDESK_LATENCY_CREATE_MS`
    #[serde(default = "default_latency_create_ms")]
    pub create_ms: u64,
    /// Environment variable: `HRDESK_LATENCY_UPDATE_MS`
    #[serde(default = "default_latency_update_ms")]
    pub update_ms: u64,
    /// Environment variable: `HRDESK_LATENCY_DELETE_MS`
    #[serde(default = "default_latency_delete_ms")]
    pub delete_ms: u64,
    /// Environment variable: `HRDESK_LATENCY_TOGGLE_MS`
    #[serde(default = "default_latency_toggle_ms")]
    pub toggle_ms: u64,
    /// Environment variable: `HRDESK_LATENCY_PROGRESS_MS`
    #[serde(default = "default_latency_progress_ms")]
    pub progress_ms: u64,
}

impl LatencyConfig {
    pub fn millis_for(&self, class: OperationClass) -> u64 {
        match class {
            OperationClass::List => self.list_ms,
            OperationClass::Fetch => self.fetch_ms,
            OperationClass::Create => self.create_ms,
            OperationClass::Update => self.update_ms,
            OperationClass::Delete => self.delete_ms,
            OperationClass::Toggle => self.toggle_ms,
            OperationClass::Progress => self.progress_ms,
        }
    }

    /// Validate latency bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        for class in OperationClass::ALL {
            let value = self.millis_for(class);
            if value > MAX_LATENCY_MS {
                return Err(ConfigError::InvalidLatency {
                    class: class.as_str().to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: default_latency_enabled(),
            list_ms: default_latency_list_ms(),
            fetch_ms: default_latency_fetch_ms(),
            create_ms: default_latency_create_ms(),
            update_ms: default_latency_update_ms(),
            delete_ms: default_latency_delete_ms(),
            toggle_ms: default_latency_toggle_ms(),
            progress_ms: default_latency_progress_ms(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            fixtures_dir: None,
            latency: LatencyConfig::default(),
        }
    }
}

impl AppConfig {
    /// Returns a pretty JSON representation for startup logging.
    pub fn redacted_json(&self) -> serde_json::Result<String> {
        // Nothing secret today; keep the hook so callers never print raw config.
        serde_json::to_string_pretty(self)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !KNOWN_LOG_FORMATS.contains(&self.log_format.as_str()) {
            return Err(ConfigError::InvalidLogFormat {
                value: self.log_format.clone(),
            });
        }

        if let Some(dir) = &self.fixtures_dir
            && !dir.is_dir()
        {
            return Err(ConfigError::MissingFixturesDir { path: dir.clone() });
        }

        self.latency.validate()?;

        Ok(())
    }
}

fn default_profile() -> String {
    "local".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_latency_enabled() -> bool {
    true
}

fn default_latency_list_ms() -> u64 {
    300
}

fn default_latency_fetch_ms() -> u64 {
    250
}

fn default_latency_create_ms() -> u64 {
    400
}

fn default_latency_update_ms() -> u64 {
    350
}

fn default_latency_delete_ms() -> u64 {
    300
}

fn default_latency_toggle_ms() -> u64 {
    250
}

fn default_latency_progress_ms() -> u64 {
    200
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load environment file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
    #[error("invalid value '{value}' for {key}: expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
    #[error("log format must be one of json, pretty; got '{value}'")]
    InvalidLogFormat { value: String },
    #[error("fixtures directory {path} does not exist")]
    MissingFixturesDir { path: PathBuf },
    #[error("{class} latency must not exceed 10000ms, got {value}")]
    InvalidLatency { class: String, value: u64 },
}

/// Loads configuration using layered `.env` files and `HRDESK_*` env vars.
pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a new loader rooted at the current working directory.
    pub fn new() -> Self {
        Self {
            base_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Creates a loader rooted at the provided directory (useful for tests).
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Loads configuration: dotenv layers first, process environment last.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let (mut layered, profile_hint) = self.collect_layered_env()?;

        // Overlay process environment last so it wins.
        for (key, value) in env::vars() {
            if let Some(stripped) = key.strip_prefix("HRDESK_") {
                layered.insert(stripped.to_string(), value);
            }
        }

        let profile = layered
            .remove("PROFILE")
            .filter(|v| !v.is_empty())
            .unwrap_or(profile_hint);
        let log_level = layered
            .remove("LOG_LEVEL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_log_level);
        let log_format = layered
            .remove("LOG_FORMAT")
            .filter(|v| !v.is_empty())
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_else(default_log_format);
        let fixtures_dir = layered
            .remove("FIXTURES_DIR")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(|v| self.resolve_path(v));

        // The test profile runs without artificial delay unless asked otherwise.
        let latency_default = profile != "test";
        let latency = LatencyConfig {
            enabled: parse_bool(&mut layered, "LATENCY_ENABLED")?.unwrap_or(latency_default),
            list_ms: parse_millis(&mut layered, "LATENCY_LIST_MS")?
                .unwrap_or_else(default_latency_list_ms),
            fetch_ms: parse_millis(&mut layered, "LATENCY_FETCH_MS")?
                .unwrap_or_else(default_latency_fetch_ms),
            create_ms: parse_millis(&mut layered, "LATENCY_CREATE_MS")?
                .unwrap_or_else(default_latency_create_ms),
            update_ms: parse_millis(&mut layered, "LATENCY_UPDATE_MS")?
                .unwrap_or_else(default_latency_update_ms),
            delete_ms: parse_millis(&mut layered, "LATENCY_DELETE_MS")?
                .unwrap_or_else(default_latency_delete_ms),
            toggle_ms: parse_millis(&mut layered, "LATENCY_TOGGLE_MS")?
                .unwrap_or_else(default_latency_toggle_ms),
            progress_ms: parse_millis(&mut layered, "LATENCY_PROGRESS_MS")?
                .unwrap_or_else(default_latency_progress_ms),
        };

        let config = AppConfig {
            profile,
            log_level,
            log_format,
            fixtures_dir,
            latency,
        };

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    fn resolve_path(&self, value: String) -> PathBuf {
        let path = PathBuf::from(value);
        if path.is_absolute() {
            path
        } else {
            self.base_dir.join(path)
        }
    }

    fn collect_layered_env(&self) -> Result<(BTreeMap<String, String>, String), ConfigError> {
        let mut values = BTreeMap::new();

        self.merge_dotenv(self.base_dir.join(".env"), &mut values)?;
        self.merge_dotenv(self.base_dir.join(".env.local"), &mut values)?;

        let profile = env::var("HRDESK_PROFILE")
            .ok()
            .or_else(|| values.get("PROFILE").cloned())
            .unwrap_or_else(default_profile);

        self.merge_dotenv(
            self.base_dir.join(format!(".env.{}", &profile)),
            &mut values,
        )?;
        self.merge_dotenv(
            self.base_dir.join(format!(".env.{}.local", &profile)),
            &mut values,
        )?;

        Ok((values, profile))
    }

    fn merge_dotenv(
        &self,
        path: PathBuf,
        values: &mut BTreeMap<String, String>,
    ) -> Result<(), ConfigError> {
        match dotenvy::from_path_iter(&path) {
            Ok(iter) => {
                for item in iter {
                    let (key, value) = item.map_err(|source| ConfigError::EnvFile {
                        path: path.clone(),
                        source,
                    })?;
                    if let Some(stripped) = key.strip_prefix("HRDESK_") {
                        values.insert(stripped.to_string(), value);
                    }
                }
                Ok(())
            }
            Err(dotenvy::Error::Io(ref io_err))
                if io_err.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(())
            }
            Err(err) => Err(ConfigError::EnvFile { path, source: err }),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_millis(
    layered: &mut BTreeMap<String, String>,
    key: &str,
) -> Result<Option<u64>, ConfigError> {
    match layered.remove(key).filter(|v| !v.trim().is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: format!("HRDESK_{key}"),
                value: raw,
                expected: "a non-negative integer number of milliseconds",
            }),
    }
}

fn parse_bool(
    layered: &mut BTreeMap<String, String>,
    key: &str,
) -> Result<Option<bool>, ConfigError> {
    match layered.remove(key).filter(|v| !v.trim().is_empty()) {
        None => Ok(None),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidValue {
                key: format!("HRDESK_{key}"),
                value: raw,
                expected: "a boolean (true/false)",
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.latency.millis_for(OperationClass::Update), 350);
    }

    #[test]
    fn test_latency_validation() {
        let config = LatencyConfig {
            create_ms: MAX_LATENCY_MS + 1,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLatency { ref class, .. } if class == "create"));
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let config = AppConfig {
            log_format: "xml".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLogFormat { .. })
        ));
    }

    #[test]
    fn test_parse_helpers() {
        let mut layered = BTreeMap::new();
        layered.insert("A".to_string(), "off".to_string());
        layered.insert("B".to_string(), "125".to_string());
        layered.insert("C".to_string(), "soon".to_string());

        assert_eq!(parse_bool(&mut layered, "A").unwrap(), Some(false));
        assert_eq!(parse_millis(&mut layered, "B").unwrap(), Some(125));
        assert!(parse_millis(&mut layered, "C").is_err());
        assert_eq!(parse_millis(&mut layered, "MISSING").unwrap(), None);
    }
}
