//! Configuration

pub mod config;

pub use config::{CompassConfig, ConfigError, LogLevel};
