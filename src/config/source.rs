use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

use tracing::debug;

use super::validation::ConfigValidator;
use crate::error::{PlayerError, Result};
use crate::playlist::PlaylistItem;

/// Handle to the on-disk playlist definition.
///
/// Change detection is a per-tick modification-time comparison; the file is
/// read and decoded only when the timestamp differs from the one recorded by
/// the last successful load. Splitting the cheap stat from the full decode
/// keeps the 1 Hz poll essentially free.
#[derive(Debug)]
pub struct PlaylistSource {
    path: PathBuf,
    last_modified: Option<SystemTime>,
}

/// Outcome of a single change-detection poll.
#[derive(Debug)]
pub enum PollOutcome {
    /// The source has not changed since the last successful load.
    Unchanged,
    /// The source changed (or had never been loaded) and decoded cleanly.
    Reloaded(Vec<PlaylistItem>),
}

impl PlaylistSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_modified: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stat the source for its last-modified time.
    pub fn modified_time(&self) -> Result<SystemTime> {
        let metadata = fs::metadata(&self.path).map_err(|e| PlayerError::SourceUnavailable {
            path: self.path.clone(),
            source: e,
        })?;
        metadata.modified().map_err(|e| PlayerError::SourceUnavailable {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Read and decode the full playlist, all-or-nothing.
    ///
    /// The timestamp recorded for change detection is the one observed just
    /// before the read, so an edit racing the load is picked up again on the
    /// next poll. A failed load leaves the recorded timestamp untouched and
    /// the next poll retries.
    pub fn load(&mut self) -> Result<Vec<PlaylistItem>> {
        let modified = self.modified_time()?;

        let text = fs::read_to_string(&self.path).map_err(|e| PlayerError::SourceUnavailable {
            path: self.path.clone(),
            source: e,
        })?;

        let items: Vec<PlaylistItem> =
            serde_json::from_str(&text).map_err(|e| PlayerError::Decode {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        ConfigValidator::validate_items(&items).map_err(|e| PlayerError::Decode {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        self.last_modified = Some(modified);
        Ok(items)
    }

    /// Per-tick change check: cheap stat first, full reload only when the
    /// timestamp moved.
    pub fn poll(&mut self) -> Result<PollOutcome> {
        let modified = self.modified_time()?;
        if self.last_modified == Some(modified) {
            return Ok(PollOutcome::Unchanged);
        }

        debug!(path = %self.path.display(), "playlist source changed, reloading");
        Ok(PollOutcome::Reloaded(self.load()?))
    }
}
