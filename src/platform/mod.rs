use std::path::{Path, PathBuf};

use crate::error::Result;

pub mod unix;
pub mod windows;

pub use unix::UnixPathResolver;
pub use windows::WindowsPathResolver;

/// Resolves playlist-relative asset paths into playable references.
///
/// Media clips take a plain absolute path; vector animations take a
/// local-file URL whose shape is OS-specific, so each target gets its own
/// implementation. Both implementations are plain string handling and
/// compile everywhere, which keeps them testable from any host.
pub trait PathResolver: Send + Sync {
    /// Absolute filesystem path for a media clip.
    fn clip_path(&self, base_dir: &Path, relative: &str) -> PathBuf;

    /// Fully qualified local-file URL for a vector animation.
    fn vector_url(&self, base_dir: &Path, relative: &str) -> Result<String>;
}

/// Create the path resolver for the current platform.
pub fn create_platform_path_resolver() -> Box<dyn PathResolver> {
    if cfg!(target_os = "windows") {
        Box::new(WindowsPathResolver)
    } else {
        Box::new(UnixPathResolver)
    }
}
