use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("playlist source unavailable: {path}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("playlist source malformed: {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("playlist is empty")]
    EmptyPlaylist,

    #[error("cannot build a playable reference for {path}: {reason}")]
    UnsupportedPath { path: String, reason: String },

    #[error("render surface error: {0}")]
    Surface(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PlayerError>;
