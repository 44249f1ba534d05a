use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::PlayerConfig;

/// Initialize logging with default options.
pub fn init_logging() -> Result<()> {
    init_logging_with_options(None)
}

/// Initialize logging with the debug flag from the command line.
pub fn init_logging_with_debug(debug: bool) -> Result<()> {
    init_logging_with_options(Some(if debug { "debug" } else { "info" }))
}

/// Initialize logging. An explicit `RUST_LOG` environment filter takes
/// precedence over the supplied level.
pub fn init_logging_with_options(log_level: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level.unwrap_or("info")))
        .context("invalid log filter")?;

    let fmt_layer = fmt::layer().with_target(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();

    info!("logging initialized with level: {}", log_level.unwrap_or("info"));
    Ok(())
}

/// Log startup information for unattended-display debugging.
pub fn log_startup_info(config: &PlayerConfig) {
    info!("=== Signloop Player Starting ===");
    info!("Playlist file: {}", config.playlist_path.display());
    info!("Asset base directory: {}", config.base_dir.display());
    info!("Tick interval: {:?}", config.tick_interval);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_initialization() {
        // The global subscriber can only be installed once per process; this
        // is the only test that does so.
        let result = init_logging_with_options(Some("debug"));
        assert!(result.is_ok());
    }
}
