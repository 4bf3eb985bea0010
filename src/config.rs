use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::core::scheduler::DEFAULT_MEETING_LINK_BASE;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub scheduling: SchedulingSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3000 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_timezone_weight")]
    pub timezone: f64,
    #[serde(default = "default_cultural_weight")]
    pub cultural: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone_weight(),
            cultural: default_cultural_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        ScoringWeights {
            timezone: config.timezone,
            cultural: config.cultural,
        }
    }
}

fn default_timezone_weight() -> f64 { 0.7 }
fn default_cultural_weight() -> f64 { 0.3 }

#[derive(Debug, Clone, Deserialize)]
pub struct SchedulingSettings {
    #[serde(default = "default_meeting_link_base")]
    pub meeting_link_base: String,
}

impl Default for SchedulingSettings {
    fn default() -> Self {
        Self {
            meeting_link_base: default_meeting_link_base(),
        }
    }
}

fn default_meeting_link_base() -> String { DEFAULT_MEETING_LINK_BASE.to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_capacity")]
    pub capacity: u64,
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            capacity: default_store_capacity(),
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}

fn default_store_capacity() -> u64 { 10_000 }
fn default_session_ttl_secs() -> u64 { 7 * 24 * 3600 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PINGPAIR__)
    /// 5. A bare PORT variable, as set by most hosting platforms
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PINGPAIR__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("PINGPAIR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_port_override(settings, std::env::var("PORT").ok())?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PINGPAIR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

/// Let a bare `PORT` value win over every other source
fn apply_port_override(settings: Config, port: Option<String>) -> Result<Config, ConfigError> {
    let Some(port) = port else {
        return Ok(settings);
    };

    let port: u16 = port
        .trim()
        .parse()
        .map_err(|e| ConfigError::Message(format!("invalid PORT {:?}: {}", port, e)))?;

    Config::builder()
        .add_source(settings)
        .set_override("server.port", i64::from(port))?
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.timezone, 0.7);
        assert_eq!(weights.cultural, 0.3);
        assert_eq!(ScoringWeights::from(&weights), ScoringWeights::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings: Settings = Config::builder().build().unwrap().try_deserialize().unwrap();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.scheduling.meeting_link_base, "https://meet.pingpair.com");
        assert_eq!(settings.scoring_weights(), ScoringWeights::default());
    }

    #[test]
    fn test_port_override() {
        let base = Config::builder().set_override("server.port", 8080i64).unwrap().build().unwrap();

        let overridden = apply_port_override(base.clone(), Some("9090".to_string())).unwrap();
        let settings: Settings = overridden.try_deserialize().unwrap();
        assert_eq!(settings.server.port, 9090);

        let untouched: Settings = apply_port_override(base.clone(), None).unwrap().try_deserialize().unwrap();
        assert_eq!(untouched.server.port, 8080);

        assert!(apply_port_override(base, Some("not-a-port".to_string())).is_err());
    }
}
