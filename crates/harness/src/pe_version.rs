//! PE version — reads the release version out of a distribution's
//! `LATEST`-style version file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ScrapeError;

/// `<word>.<digits>.<digits>`, e.g. `3.7.1` out of `3.7.1-rc0-8-g73f93cb`.
static VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\w+\.\d+\.\d+)").expect("version pattern is valid")
});

/// Read `dist_dir/version_file` and return the last version found in it.
///
/// Fails with [`ScrapeError::MissingFile`] when the file cannot be opened,
/// and [`ScrapeError::NoVersion`] when no line carries a version.
pub fn load_pe_version(dist_dir: impl AsRef<Path>, version_file: &str) -> Result<String, ScrapeError> {
    let path = dist_dir.as_ref().join(version_file);
    let file = File::open(&path).map_err(|source| ScrapeError::MissingFile {
        path: path.clone(),
        source,
    })?;

    let mut version = None;
    for line in BufReader::new(file).lines() {
        let line = line?;
        if let Some(found) = VERSION.captures(&line).and_then(|c| c.get(1)) {
            version = Some(found.as_str().trim().to_string());
        }
    }

    match version {
        Some(v) => {
            tracing::debug!(path = %path.display(), version = %v, "Loaded PE version");
            Ok(v)
        }
        None => Err(ScrapeError::NoVersion { path }),
    }
}
