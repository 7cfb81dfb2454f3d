use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoggerError;
use crate::level::LogLevel;
use crate::sink::stream::resolve_path;

/// Logger settings as read from `harness.toml` and the environment.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub log_level: LogLevel,
    pub color: bool,
    pub quiet: bool,
    /// Primary file sink. Standard output is the primary sink when unset.
    pub log_file: Option<String>,
    /// Extra file sinks added after construction.
    pub destinations: Vec<String>,
}

impl LoggerConfig {
    /// Validate configuration values. No files are opened here.
    pub fn validate(&self) -> Result<(), LoggerError> {
        if let Some(file) = &self.log_file {
            if file.trim().is_empty() {
                return Err(LoggerError::Config("log_file must not be empty".to_string()));
            }
        }
        if self.destinations.iter().any(|d| d.trim().is_empty()) {
            return Err(LoggerError::Config("destinations must not contain empty paths".to_string()));
        }
        if let Some(file) = &self.log_file {
            let primary = resolve_path(Path::new(file))?;
            for dest in &self.destinations {
                if resolve_path(Path::new(dest))? == primary {
                    return Err(LoggerError::Config(format!(
                        "{} is both log_file and an extra destination",
                        dest
                    )));
                }
            }
        }
        Ok(())
    }
}
