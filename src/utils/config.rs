use crate::api::types::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Largest sample queue accepted by [`CompassConfig::validate`]
pub const MAX_SAMPLE_QUEUE_CAPACITY: usize = 1024;

/// Engine configuration.
///
/// The sampling interval and the target are fixed and deliberately absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompassConfig {
    /// Log verbosity used when `RUST_LOG` is not set
    pub log_level: LogLevel,
    /// Pending samples held between the provider and the orchestrator
    pub sample_queue_capacity: usize,
    /// Snapshot output format
    pub output_format: OutputFormat,
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            sample_queue_capacity: 16,
            output_format: OutputFormat::Text,
        }
    }
}

/// Logging levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging
    Off,
    /// Error messages only
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and info messages
    #[default]
    Info,
    /// Everything up to debug
    Debug,
    /// Per-sample tracing
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file I/O error
    #[error("failed to access config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON serialization/deserialization error
    #[error("invalid config JSON: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Invalid parameter value
    #[error("invalid {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
}

impl CompassConfig {
    /// Load and validate a JSON config file. Missing fields take defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config: CompassConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        self.validate()?;
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_queue_capacity == 0 || self.sample_queue_capacity > MAX_SAMPLE_QUEUE_CAPACITY {
            return Err(ConfigError::InvalidParameter {
                parameter: "sample_queue_capacity".to_string(),
                value: self.sample_queue_capacity.to_string(),
                reason: format!("must be between 1 and {}", MAX_SAMPLE_QUEUE_CAPACITY),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CompassConfig::default().validate().is_ok());
    }

    #[test]
    fn test_queue_capacity_bounds() {
        let mut config = CompassConfig::default();
        config.sample_queue_capacity = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { .. })
        ));

        config.sample_queue_capacity = MAX_SAMPLE_QUEUE_CAPACITY + 1;
        assert!(config.validate().is_err());

        config.sample_queue_capacity = MAX_SAMPLE_QUEUE_CAPACITY;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("compass.json");

        let config = CompassConfig {
            log_level: LogLevel::Debug,
            sample_queue_capacity: 4,
            output_format: OutputFormat::Json,
        };
        config.save_to_file(&path).unwrap();

        let loaded = CompassConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("compass.json");
        fs::write(&path, r#"{ "log_level": "warn" }"#).unwrap();

        let loaded = CompassConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.log_level, LogLevel::Warn);
        assert_eq!(loaded.sample_queue_capacity, 16);
        assert_eq!(loaded.output_format, OutputFormat::Text);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("compass.json");
        fs::write(&path, r#"{ "sample_queue_capacity": 0 }"#).unwrap();
        assert!(CompassConfig::load_from_file(&path).is_err());

        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            CompassConfig::load_from_file(&path),
            Err(ConfigError::Serialization(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = CompassConfig::load_from_file("/nonexistent/compass.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
