use std::path::{Path, PathBuf};

use super::PathResolver;
use crate::error::{PlayerError, Result};

/// Base authority for vector-animation URLs. The deployed vector surface
/// loads its asset through the loopback administrative share rather than a
/// plain `file:///` URL, so the drive letter becomes a `<drive>$` component.
const VECTOR_URL_BASE: &str = "file://127.0.0.1";

/// Path resolver for Windows-style drive-letter paths.
pub struct WindowsPathResolver;

impl WindowsPathResolver {
    /// Split `C:\signage\assets` into its drive letter and remainder.
    fn split_drive(base_dir: &Path) -> Option<(char, String)> {
        let text = base_dir.to_string_lossy();
        let mut chars = text.chars();
        let drive = chars.next()?;
        if !drive.is_ascii_alphabetic() || chars.next() != Some(':') {
            return None;
        }
        let rest = chars.as_str().trim_start_matches(['\\', '/']).to_string();
        Some((drive.to_ascii_lowercase(), rest))
    }
}

impl PathResolver for WindowsPathResolver {
    fn clip_path(&self, base_dir: &Path, relative: &str) -> PathBuf {
        base_dir.join(relative)
    }

    fn vector_url(&self, base_dir: &Path, relative: &str) -> Result<String> {
        let (drive, rest) =
            Self::split_drive(base_dir).ok_or_else(|| PlayerError::UnsupportedPath {
                path: base_dir.display().to_string(),
                reason: "base directory has no drive prefix".to_string(),
            })?;

        let mut url = format!("{}/{}$", VECTOR_URL_BASE, drive);

        let rest = rest.replace('\\', "/");
        let rest = rest.trim_end_matches('/');
        if !rest.is_empty() {
            url.push('/');
            url.push_str(rest);
        }

        let relative = relative.replace('\\', "/");
        url.push('/');
        url.push_str(relative.trim_start_matches('/'));

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_url_uses_the_administrative_share() {
        let url = WindowsPathResolver
            .vector_url(Path::new(r"C:\signage\assets"), "promo/loop.swf")
            .unwrap();
        assert_eq!(url, "file://127.0.0.1/c$/signage/assets/promo/loop.swf");
    }

    #[test]
    fn vector_url_normalizes_backslashes_and_trailing_separators() {
        let url = WindowsPathResolver
            .vector_url(Path::new(r"D:\kiosk\"), r"banners\spring.swf")
            .unwrap();
        assert_eq!(url, "file://127.0.0.1/d$/kiosk/banners/spring.swf");
    }

    #[test]
    fn vector_url_handles_a_bare_drive_root() {
        let url = WindowsPathResolver
            .vector_url(Path::new(r"E:\"), "intro.swf")
            .unwrap();
        assert_eq!(url, "file://127.0.0.1/e$/intro.swf");
    }

    #[test]
    fn base_without_drive_prefix_is_rejected() {
        let result = WindowsPathResolver.vector_url(Path::new(r"\\server\share"), "a.swf");
        assert!(matches!(result, Err(PlayerError::UnsupportedPath { .. })));
    }
}
