use anyhow::{Context, Result};
use std::{path::PathBuf, time::Duration};

pub mod source;
pub mod validation;

use validation::ConfigValidator;

/// Default playlist file name, resolved against the working directory.
pub const DEFAULT_PLAYLIST_FILE: &str = "content.conf";

const DEFAULT_TICK_SECS: u64 = 1;

/// Runtime configuration for the player process.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Playlist file to play and watch for changes.
    pub playlist_path: PathBuf,

    /// Directory asset paths are resolved against.
    pub base_dir: PathBuf,

    /// Interval of the scheduler clock; also the playlist poll rate.
    pub tick_interval: Duration,

    /// Verbose logging.
    pub debug: bool,
}

impl PlayerConfig {
    /// Create configuration from command line arguments.
    pub fn from_args() -> Result<Self> {
        use clap::Parser;

        #[derive(Parser, Debug)]
        #[command(author, version, about, long_about = None)]
        struct Args {
            /// Playlist file to play and watch for changes
            playlist: Option<PathBuf>,

            /// Directory asset paths are resolved against
            #[arg(short, long)]
            base_dir: Option<PathBuf>,

            /// Scheduler clock interval in seconds
            #[arg(long, default_value_t = DEFAULT_TICK_SECS)]
            tick_secs: u64,

            /// Enable verbose logging
            #[arg(long)]
            debug: bool,
        }

        let args = Args::parse();
        Self::from_parts(args.playlist, args.base_dir, args.tick_secs, args.debug)
    }

    /// Assemble and validate a configuration from raw pieces.
    pub fn from_parts(
        playlist: Option<PathBuf>,
        base_dir: Option<PathBuf>,
        tick_secs: u64,
        debug: bool,
    ) -> Result<Self> {
        let base_dir = match base_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("cannot determine working directory")?,
        };

        let config = Self {
            playlist_path: playlist.unwrap_or_else(|| PathBuf::from(DEFAULT_PLAYLIST_FILE)),
            base_dir,
            tick_interval: Duration::from_secs(tick_secs),
            debug,
        };

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_well_known_playlist() {
        let config = PlayerConfig::from_parts(None, Some(PathBuf::from("/srv/kiosk")), 1, false)
            .unwrap();
        assert_eq!(config.playlist_path, PathBuf::from(DEFAULT_PLAYLIST_FILE));
        assert_eq!(config.base_dir, PathBuf::from("/srv/kiosk"));
        assert_eq!(config.tick_interval, Duration::from_secs(1));
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let result = PlayerConfig::from_parts(None, Some(PathBuf::from("/srv/kiosk")), 0, false);
        assert!(result.is_err());
    }
}
