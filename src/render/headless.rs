//! Log-only render surfaces for unattended hosts.
//!
//! Real deployments wire GUI widgets into the dispatcher; these
//! implementations record the intended playback actions in the log so the
//! scheduler can run without a display attached.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use super::{MediaSurface, VectorSurface};

#[derive(Debug, Default)]
pub struct HeadlessMediaSurface {
    visible: bool,
}

#[async_trait]
impl MediaSurface for HeadlessMediaSurface {
    async fn play(&mut self, path: &Path) -> anyhow::Result<()> {
        info!(path = %path.display(), "media surface: play");
        Ok(())
    }

    fn stop(&mut self) {
        info!("media surface: stop");
    }

    fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            info!(visible, "media surface: visibility");
        }
        self.visible = visible;
    }
}

#[derive(Debug, Default)]
pub struct HeadlessVectorSurface {
    visible: bool,
}

#[async_trait]
impl VectorSurface for HeadlessVectorSurface {
    async fn play(&mut self, url: &str) -> anyhow::Result<()> {
        info!(%url, "vector surface: play");
        Ok(())
    }

    fn stop(&mut self) {
        info!("vector surface: stop");
    }

    fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            info!(visible, "vector surface: visibility");
        }
        self.visible = visible;
    }
}
