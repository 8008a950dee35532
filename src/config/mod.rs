//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::calculate::{AnalyzerConfig, InsightThresholds};
use crate::parse_duration;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Divergence analysis thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_significance_threshold")]
    pub significance_threshold: f64,

    #[serde(default = "default_high_variance_std")]
    pub high_variance_std: f64,

    #[serde(default = "default_overpowered_winrate")]
    pub overpowered_winrate: f64,

    #[serde(default = "default_underpowered_winrate")]
    pub underpowered_winrate: f64,
}

fn default_significance_threshold() -> f64 {
    0.05
}

fn default_high_variance_std() -> f64 {
    0.03
}

fn default_overpowered_winrate() -> f64 {
    0.55
}

fn default_underpowered_winrate() -> f64 {
    0.45
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            significance_threshold: default_significance_threshold(),
            high_variance_std: default_high_variance_std(),
            overpowered_winrate: default_overpowered_winrate(),
            underpowered_winrate: default_underpowered_winrate(),
        }
    }
}

impl AnalysisConfig {
    pub fn to_analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            significance_threshold: self.significance_threshold,
            insights: InsightThresholds {
                high_variance_std: self.high_variance_std,
                overpowered_winrate: self.overpowered_winrate,
                underpowered_winrate: self.underpowered_winrate,
            },
        }
    }
}

/// Rate provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Dataset file; the bundled sample is used when unset
    #[serde(default)]
    pub dataset: Option<PathBuf>,

    /// Per-call fetch timeout (e.g. "5s", "1m")
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: String,
}

fn default_fetch_timeout() -> String {
    "10s".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            fetch_timeout: default_fetch_timeout(),
        }
    }
}

impl ProviderConfig {
    pub fn fetch_timeout(&self) -> Option<Duration> {
        parse_duration(&self.fetch_timeout)
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            analysis: AnalysisConfig::default(),
            provider: ProviderConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.analysis;
        for (name, value) in [
            ("significance_threshold", a.significance_threshold),
            ("high_variance_std", a.high_variance_std),
            ("overpowered_winrate", a.overpowered_winrate),
            ("underpowered_winrate", a.underpowered_winrate),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "analysis.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if a.underpowered_winrate >= a.overpowered_winrate {
            return Err(ConfigError::ValidationError(
                "analysis.underpowered_winrate must be below analysis.overpowered_winrate"
                    .to_string(),
            ));
        }

        match self.provider.fetch_timeout() {
            Some(d) if !d.is_zero() => {}
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "provider.fetch_timeout must be a non-zero duration, got {:?}",
                    self.provider.fetch_timeout
                )));
            }
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
