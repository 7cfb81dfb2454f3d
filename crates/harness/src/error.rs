use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Version file not readable at {}: {source}", path.display())]
    MissingFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No version string found in {}", path.display())]
    NoVersion { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
