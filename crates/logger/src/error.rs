use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Invalid log level: {0} (expected one of trace, debug, verbose, info)")]
    InvalidLevel(String),
    #[error("Failed to open log destination {}: {source}", path.display())]
    DestinationOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid logger configuration: {0}")]
    Config(String),
    #[error("Failed to parse logger configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LoggerError>;
