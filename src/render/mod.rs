use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::platform::PathResolver;
use crate::playlist::PlaylistItem;

pub mod headless;

pub use headless::{HeadlessMediaSurface, HeadlessVectorSurface};

/// Extension that selects the vector-animation surface; everything else is
/// treated as a media clip.
const VECTOR_EXTENSION: &str = "swf";

/// Asset classification used to pick a render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    MediaClip,
    VectorAnimation,
}

impl MediaKind {
    /// Classify an asset by its file extension.
    pub fn classify(path: &str) -> Self {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        if extension.eq_ignore_ascii_case(VECTOR_EXTENSION) {
            MediaKind::VectorAnimation
        } else {
            MediaKind::MediaClip
        }
    }
}

/// Video/audio playback widget.
///
/// The host delivers its end-of-clip signal by sending `MediaEnded` into the
/// scheduler's command queue; the surface itself only plays, stops, and
/// toggles visibility.
#[async_trait]
pub trait MediaSurface: Send {
    /// Start playing the clip at the given absolute path.
    async fn play(&mut self, path: &Path) -> anyhow::Result<()>;

    fn stop(&mut self);

    fn set_visible(&mut self, visible: bool);
}

/// Vector-animation widget, driven by a local-file URL.
#[async_trait]
pub trait VectorSurface: Send {
    /// Start the animation at the given file URL.
    async fn play(&mut self, url: &str) -> anyhow::Result<()>;

    fn stop(&mut self);

    fn set_visible(&mut self, visible: bool);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveAsset {
    kind: MediaKind,
    file_path: String,
}

/// Routes the active playlist item onto exactly one of the two render
/// surfaces, keeping the other stopped and hidden.
pub struct RenderDispatcher {
    media: Box<dyn MediaSurface>,
    vector: Box<dyn VectorSurface>,
    resolver: Box<dyn PathResolver>,
    base_dir: PathBuf,
    active: Option<ActiveAsset>,
}

impl RenderDispatcher {
    pub fn new(
        media: Box<dyn MediaSurface>,
        vector: Box<dyn VectorSurface>,
        resolver: Box<dyn PathResolver>,
        base_dir: PathBuf,
    ) -> Self {
        Self {
            media,
            vector,
            resolver,
            base_dir,
            active: None,
        }
    }

    /// Activate the surface matching the item's media kind and start it.
    ///
    /// Re-dispatching the item that is already active re-asserts surface
    /// visibility without restarting playback.
    pub async fn dispatch(&mut self, item: &PlaylistItem) -> Result<()> {
        let kind = MediaKind::classify(&item.file_path);
        let already_active = self
            .active
            .as_ref()
            .is_some_and(|active| active.kind == kind && active.file_path == item.file_path);

        match kind {
            MediaKind::MediaClip => {
                self.vector.stop();
                self.vector.set_visible(false);
                self.media.set_visible(true);
                if !already_active {
                    let path = self.resolver.clip_path(&self.base_dir, &item.file_path);
                    debug!(path = %path.display(), "starting media clip");
                    self.media.play(&path).await?;
                }
            }
            MediaKind::VectorAnimation => {
                self.media.stop();
                self.media.set_visible(false);
                self.vector.set_visible(true);
                if !already_active {
                    let url = self.resolver.vector_url(&self.base_dir, &item.file_path)?;
                    debug!(%url, "starting vector animation");
                    self.vector.play(&url).await?;
                }
            }
        }

        self.active = Some(ActiveAsset {
            kind,
            file_path: item.file_path.clone(),
        });
        Ok(())
    }

    /// Stop playback on both surfaces. Visibility is left as-is.
    pub fn stop(&mut self) {
        self.media.stop();
        self.vector.stop();
        self.active = None;
    }
}
