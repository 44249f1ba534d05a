use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::source::{PlaylistSource, PollOutcome};
use crate::playlist::{Playlist, PlaylistItem};
use crate::render::RenderDispatcher;

/// Commands consumed by the scheduler loop, strictly in arrival order.
///
/// Funneling every trigger through one queue gives the advance logic a
/// single call site: the clock, the media backend, and user input cannot
/// race each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    /// One interval of wall-clock time elapsed.
    Tick,
    /// The media surface finished the current clip before its budget ran out.
    MediaEnded,
    /// User asked to move to the next item.
    Skip,
    /// Leave the loop.
    Shutdown,
}

pub type CommandSender = mpsc::UnboundedSender<PlayerCommand>;
pub type CommandReceiver = mpsc::UnboundedReceiver<PlayerCommand>;

/// Create the command channel connecting producers (ticker, input, render
/// backend) to the scheduler loop.
pub fn command_channel() -> (CommandSender, CommandReceiver) {
    mpsc::unbounded_channel()
}

/// Playback state of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No items loaded; only playlist polling is active.
    Idle,
    /// An item is on screen and its tick budget is running.
    Playing,
}

/// Playback scheduler: owns the playlist, the tick budget, and the render
/// dispatcher, and advances items on duration expiry, end-of-media, or skip.
pub struct Scheduler {
    source: PlaylistSource,
    playlist: Playlist,
    dispatcher: RenderDispatcher,
    state: PlaybackState,
    elapsed_ticks: u64,
    current_duration: u64,
}

impl Scheduler {
    pub fn new(source: PlaylistSource, dispatcher: RenderDispatcher) -> Self {
        Self {
            source,
            playlist: Playlist::new(),
            dispatcher,
            state: PlaybackState::Idle,
            elapsed_ticks: 0,
            current_duration: 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    pub fn current_duration(&self) -> u64 {
        self.current_duration
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Initial load. A missing or malformed playlist is not fatal: the
    /// scheduler stays idle and the per-tick poll keeps retrying.
    pub async fn start(&mut self) {
        match self.source.load() {
            Ok(items) => self.apply_items(items).await,
            Err(e) => {
                warn!(error = %e, "initial playlist load failed, waiting for a readable playlist")
            }
        }
    }

    /// Consume commands until `Shutdown` arrives or all senders are gone.
    pub async fn run(&mut self, mut commands: CommandReceiver) {
        while let Some(command) = commands.recv().await {
            if command == PlayerCommand::Shutdown {
                info!("shutdown requested");
                break;
            }
            self.handle(command).await;
        }
    }

    /// Apply a single command. Failures are logged, never propagated: the
    /// loop must survive every error and retry on its next natural trigger.
    pub async fn handle(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Tick => self.handle_tick().await,
            PlayerCommand::MediaEnded => {
                if self.state == PlaybackState::Playing {
                    debug!("media ended before its budget, advancing");
                    self.advance().await;
                }
            }
            PlayerCommand::Skip => {
                if self.state == PlaybackState::Playing {
                    info!("skip requested");
                    self.advance().await;
                }
            }
            PlayerCommand::Shutdown => {}
        }
    }

    /// One clock interval: the playlist-change check runs first, then the
    /// duration check. A detected change reloads wholesale and suppresses
    /// this tick's duration-based advance.
    async fn handle_tick(&mut self) {
        if self.state == PlaybackState::Playing {
            self.elapsed_ticks += 1;
        }

        match self.source.poll() {
            Ok(PollOutcome::Reloaded(items)) => {
                info!(items = items.len(), "playlist changed on disk, reloading");
                self.apply_items(items).await;
                return;
            }
            Ok(PollOutcome::Unchanged) => {}
            Err(e) => {
                // Keep the last-good playlist and schedule; the next tick
                // polls again.
                warn!(error = %e, "playlist poll failed");
            }
        }

        if self.state == PlaybackState::Playing && self.elapsed_ticks >= self.current_duration {
            self.advance().await;
        }
    }

    /// Replace the playlist wholesale and restart playback from the first
    /// item, or go idle when the new list is empty.
    async fn apply_items(&mut self, items: Vec<PlaylistItem>) {
        self.playlist.load(items);
        self.elapsed_ticks = 0;

        if self.playlist.is_empty() {
            warn!("playlist is empty, playback paused until a non-empty reload");
            self.current_duration = 0;
            self.state = PlaybackState::Idle;
            self.dispatcher.stop();
            return;
        }

        self.state = PlaybackState::Playing;
        self.dispatch_current().await;
    }

    /// The one advance call site shared by the duration, end-of-media, and
    /// skip triggers.
    async fn advance(&mut self) {
        self.playlist.advance();
        self.elapsed_ticks = 0;
        self.dispatch_current().await;
    }

    /// Dispatch the current item and snapshot its duration, so a later
    /// reload cannot retroactively change the budget of the item already on
    /// screen.
    async fn dispatch_current(&mut self) {
        let (item, duration) = match self.playlist.current() {
            Ok(item) => (item.clone(), item.play_duration),
            Err(e) => {
                warn!(error = %e, "no current item to dispatch");
                return;
            }
        };

        self.current_duration = duration;
        if let Err(e) = self.dispatcher.dispatch(&item).await {
            warn!(error = %e, path = %item.file_path, "dispatch failed");
        }
    }
}

/// Drive the scheduler clock: send one `Tick` per interval until the
/// receiving side goes away.
pub fn spawn_ticker(commands: CommandSender, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first interval tick completes immediately; consume it so ticks
        // line up with whole periods after startup.
        interval.tick().await;
        loop {
            interval.tick().await;
            if commands.send(PlayerCommand::Tick).is_err() {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::UnixPathResolver;
    use crate::render::{HeadlessMediaSurface, HeadlessVectorSurface};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_playlist(dir: &TempDir, text: &str) -> PathBuf {
        let path = dir.path().join("content.conf");
        std::fs::write(&path, text).unwrap();
        path
    }

    fn scheduler_for(path: &Path) -> Scheduler {
        let dispatcher = RenderDispatcher::new(
            Box::new(HeadlessMediaSurface::default()),
            Box::new(HeadlessVectorSurface::default()),
            Box::new(UnixPathResolver),
            PathBuf::from("/srv/kiosk"),
        );
        Scheduler::new(PlaylistSource::new(path), dispatcher)
    }

    #[tokio::test]
    async fn zero_duration_item_advances_on_the_first_tick() {
        let dir = TempDir::new().unwrap();
        let path = write_playlist(
            &dir,
            r#"[{"FilePath": "a.mp4", "PlayDuration": 0}, {"FilePath": "b.mp4", "PlayDuration": 9}]"#,
        );

        let mut scheduler = scheduler_for(&path);
        scheduler.start().await;
        assert_eq!(scheduler.playlist().selected(), 0);

        scheduler.handle(PlayerCommand::Tick).await;
        assert_eq!(scheduler.playlist().selected(), 1);
        assert_eq!(scheduler.current_duration(), 9);
        assert_eq!(scheduler.elapsed_ticks(), 0);
    }

    #[tokio::test]
    async fn media_ended_is_ignored_while_idle() {
        let dir = TempDir::new().unwrap();
        let path = write_playlist(&dir, "[]");

        let mut scheduler = scheduler_for(&path);
        scheduler.start().await;
        assert_eq!(scheduler.state(), PlaybackState::Idle);

        scheduler.handle(PlayerCommand::MediaEnded).await;
        scheduler.handle(PlayerCommand::Skip).await;
        assert_eq!(scheduler.state(), PlaybackState::Idle);
        assert_eq!(scheduler.playlist().selected(), 0);
    }

    #[tokio::test]
    async fn ticks_do_not_accumulate_budget_while_idle() {
        let dir = TempDir::new().unwrap();
        let path = write_playlist(&dir, "[]");

        let mut scheduler = scheduler_for(&path);
        scheduler.start().await;

        scheduler.handle(PlayerCommand::Tick).await;
        scheduler.handle(PlayerCommand::Tick).await;
        assert_eq!(scheduler.elapsed_ticks(), 0);
        assert_eq!(scheduler.state(), PlaybackState::Idle);
    }
}
