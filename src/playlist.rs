use serde::{Deserialize, Serialize};

use crate::error::{PlayerError, Result};

/// One playlist entry: an asset path and its display budget in seconds.
///
/// Serialized field names mirror the on-disk playlist format, which predates
/// this implementation and cannot change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlaylistItem {
    /// Asset path, relative to the application base directory.
    pub file_path: String,

    /// Seconds to keep the item on screen before auto-advancing. Assets that
    /// signal their own end may advance earlier.
    pub play_duration: u64,
}

/// Ordered playlist with a monotonically increasing selection counter.
///
/// The counter is never wrapped; the active item is `items[counter % len]`.
/// Applying the modulo at read time keeps the counter valid across reloads
/// without any clamping, as long as the list is non-empty.
#[derive(Debug, Default)]
pub struct Playlist {
    items: Vec<PlaylistItem>,
    selected: u64,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire item sequence and restart from the first item.
    pub fn load(&mut self, items: Vec<PlaylistItem>) {
        self.items = items;
        self.selected = 0;
    }

    /// The currently selected item. Callers must handle the empty case
    /// before driving any playback action.
    pub fn current(&self) -> Result<&PlaylistItem> {
        if self.items.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }
        let index = (self.selected % self.items.len() as u64) as usize;
        Ok(&self.items[index])
    }

    /// Move the selection to the next item. Wrap-around happens at read
    /// time, so this is a plain increment.
    pub fn advance(&mut self) {
        self.selected += 1;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected(&self) -> u64 {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(path: &str, secs: u64) -> PlaylistItem {
        PlaylistItem {
            file_path: path.to_string(),
            play_duration: secs,
        }
    }

    #[test]
    fn current_cycles_through_items_in_order() {
        let mut playlist = Playlist::new();
        playlist.load(vec![item("a.mp4", 5), item("b.swf", 3), item("c.mp4", 7)]);

        let mut seen = Vec::new();
        for _ in 0..7 {
            seen.push(playlist.current().unwrap().file_path.clone());
            playlist.advance();
        }

        assert_eq!(seen, vec!["a.mp4", "b.swf", "c.mp4", "a.mp4", "b.swf", "c.mp4", "a.mp4"]);
    }

    #[test]
    fn counter_far_beyond_length_still_resolves() {
        let mut playlist = Playlist::new();
        playlist.load(vec![item("a.mp4", 5), item("b.swf", 3)]);

        for _ in 0..100_001 {
            playlist.advance();
        }

        assert_eq!(playlist.selected(), 100_001);
        assert_eq!(playlist.current().unwrap().file_path, "b.swf");
    }

    #[test]
    fn load_resets_selection_to_first_item() {
        let mut playlist = Playlist::new();
        playlist.load(vec![item("a.mp4", 5), item("b.swf", 3)]);
        playlist.advance();
        assert_eq!(playlist.current().unwrap().file_path, "b.swf");

        playlist.load(vec![item("x.mp4", 10), item("y.mp4", 10)]);
        assert_eq!(playlist.selected(), 0);
        assert_eq!(playlist.current().unwrap().file_path, "x.mp4");
    }

    #[test]
    fn current_on_empty_playlist_fails() {
        let playlist = Playlist::new();
        assert!(matches!(playlist.current(), Err(PlayerError::EmptyPlaylist)));
    }

    #[test]
    fn items_decode_from_legacy_field_names() {
        let text = r#"[{"FilePath": "ads/summer.mp4", "PlayDuration": 30}]"#;
        let items: Vec<PlaylistItem> = serde_json::from_str(text).unwrap();
        assert_eq!(items, vec![item("ads/summer.mp4", 30)]);
    }
}
