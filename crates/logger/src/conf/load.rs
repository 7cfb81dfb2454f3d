//! Load — logger config loading from file and environment variables.

use std::path::Path;

use super::model::LoggerConfig;
use crate::error::LoggerError;
use crate::level::LogLevel;

pub const CONFIG_FILE_ENV: &str = "HARNESS_LOG_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "harness.toml";

impl LoggerConfig {
    /// Load configuration from file and environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, LoggerError> {
        let config_path = std::env::var(CONFIG_FILE_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading logger configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::debug!("Logger config file not found at {}, using defaults", config_path);
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoggerError> {
        let contents = std::fs::read_to_string(path)?;
        let config: LoggerConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply `HARNESS_LOG_*` overrides using `lookup` to read variables.
    ///
    /// An unparsable level is an error; unparsable booleans are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), LoggerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("HARNESS_LOG_LEVEL") {
            self.log_level = LogLevel::parse(&level)?;
        }
        if let Some(color) = lookup("HARNESS_LOG_COLOR").and_then(|s| parse_flag(&s)) {
            self.color = color;
        }
        if let Some(quiet) = lookup("HARNESS_LOG_QUIET").and_then(|s| parse_flag(&s)) {
            self.quiet = quiet;
        }
        if let Some(file) = lookup("HARNESS_LOG_FILE") {
            self.log_file = if file.is_empty() { None } else { Some(file) };
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
