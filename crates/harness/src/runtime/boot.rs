//! Boot — tracing init, logger config load, logger construction.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logger::{Logger, LoggerConfig};

/// Initialise tracing for the harness's own diagnostics.
///
/// Diagnostics go to stderr so they never interleave with the logger's
/// stdout destination.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "harness=info,logger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load logger configuration (file, then environment) and build the logger.
pub fn boot() -> Result<(Logger, LoggerConfig)> {
    info!("Starting harness v{}", env!("CARGO_PKG_VERSION"));

    let config = LoggerConfig::load().context("Failed to load logger configuration")?;
    info!(
        "Logger configuration: level={}, color={}, quiet={}, log_file={}",
        config.log_level,
        config.color,
        config.quiet,
        config.log_file.as_deref().unwrap_or("<stdout>")
    );

    let logger = Logger::from_config(&config).context("Failed to open log destinations")?;
    info!("Logging to {} destination(s)", logger.destinations().len());

    Ok((logger, config))
}
