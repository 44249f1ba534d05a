use anyhow::{anyhow, Result};

use super::PlayerConfig;
use crate::playlist::PlaylistItem;

/// Configuration validator for ensuring configuration integrity
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the runtime configuration.
    pub fn validate(config: &PlayerConfig) -> Result<()> {
        Self::validate_paths(config)?;
        Self::validate_timing(config)?;
        Ok(())
    }

    fn validate_paths(config: &PlayerConfig) -> Result<()> {
        if config.playlist_path.as_os_str().is_empty() {
            return Err(anyhow!("Playlist path cannot be empty"));
        }

        if config.base_dir.as_os_str().is_empty() {
            return Err(anyhow!("Base directory cannot be empty"));
        }

        Ok(())
    }

    fn validate_timing(config: &PlayerConfig) -> Result<()> {
        if config.tick_interval.is_zero() {
            return Err(anyhow!("Tick interval must be greater than 0 seconds"));
        }

        Ok(())
    }

    /// Validate a decoded playlist. An item-level violation rejects the
    /// whole load, the same as a malformed file: the previously loaded
    /// playlist stays active.
    pub fn validate_items(items: &[PlaylistItem]) -> Result<()> {
        for (index, item) in items.iter().enumerate() {
            if item.file_path.trim().is_empty() {
                return Err(anyhow!("item {}: FilePath cannot be empty", index));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{path::PathBuf, time::Duration};

    fn config() -> PlayerConfig {
        PlayerConfig {
            playlist_path: PathBuf::from("content.conf"),
            base_dir: PathBuf::from("/srv/kiosk"),
            tick_interval: Duration::from_secs(1),
            debug: false,
        }
    }

    #[test]
    fn accepts_well_formed_configuration() {
        assert!(ConfigValidator::validate(&config()).is_ok());
    }

    #[test]
    fn rejects_zero_tick_interval() {
        let mut config = config();
        config.tick_interval = Duration::ZERO;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn rejects_empty_playlist_path() {
        let mut config = config();
        config.playlist_path = PathBuf::new();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn rejects_item_with_blank_file_path() {
        let items = vec![PlaylistItem {
            file_path: "  ".to_string(),
            play_duration: 5,
        }];
        assert!(ConfigValidator::validate_items(&items).is_err());
    }

    #[test]
    fn accepts_zero_duration_items() {
        let items = vec![PlaylistItem {
            file_path: "a.mp4".to_string(),
            play_duration: 0,
        }];
        assert!(ConfigValidator::validate_items(&items).is_ok());
    }
}
