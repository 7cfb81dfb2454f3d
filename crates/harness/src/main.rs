use anyhow::{Context, Result};
use harness::pe_version::load_pe_version;
use harness::runtime::{boot, relay};

fn main() -> Result<()> {
    boot::init_logging();
    let (logger, _config) = boot::boot()?;

    if let Ok(dist_dir) = std::env::var("HARNESS_PE_DIST_DIR") {
        match load_pe_version(&dist_dir, "LATEST") {
            Ok(version) => logger.notify(format!("PE version: {}", version)),
            Err(e) => logger.warn(e.to_string()),
        }
    }

    let stdin = std::io::stdin();
    let count = relay::relay(stdin.lock(), &logger).context("Failed to read host output")?;
    logger.success(format!("Relayed {} lines of host output", count));

    Ok(())
}
