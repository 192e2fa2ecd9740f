//! Core types for playback management

use anthem_core::types::Song;
use serde::{Deserialize, Serialize};

/// Track information for queue management
///
/// Read-only projection of a [`Song`] carrying everything the playback
/// surfaces need. `audio_uri` is absent while generation is still running,
/// in which case the track is visible in the queue but not yet playable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueTrack {
    /// Unique track identifier from the song store
    pub id: String,

    /// Track title
    pub title: String,

    /// Locator for the generated audio; `None` while generation is pending
    pub audio_uri: Option<String>,

    /// Musical genre (display only)
    pub genre: Option<String>,

    /// Trip location (display only)
    pub location: Option<String>,

    /// People featured in the story (display only)
    #[serde(default)]
    pub people: Vec<String>,

    /// Album artwork locator (display only)
    pub artwork_uri: Option<String>,
}

impl From<&Song> for QueueTrack {
    fn from(song: &Song) -> Self {
        Self {
            id: song.id.as_str().to_string(),
            title: song.title.clone(),
            audio_uri: song.audio_url.clone(),
            genre: song.genre.clone(),
            location: song.location.clone(),
            people: song.people.clone(),
            artwork_uri: song.artwork_url.clone(),
        }
    }
}

impl QueueTrack {
    /// Whether the track has playable media
    pub fn is_playable(&self) -> bool {
        self.audio_uri.is_some()
    }
}

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No track loaded
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Stop when the queue ends
    Off,

    /// Loop the entire queue
    All,

    /// Loop the current track only
    One,
}

/// Configuration for the player controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Maximum navigation history size (default: 10)
    pub history_size: usize,

    /// Initial volume (0.0-1.0, default: 1.0)
    pub volume: f32,

    /// Whether shuffle starts enabled (default: false)
    pub shuffle: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            history_size: 10,
            volume: 1.0,
            shuffle: false,
            repeat: RepeatMode::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.history_size, 10);
        assert_eq!(config.volume, 1.0);
        assert!(!config.shuffle);
        assert_eq!(config.repeat, RepeatMode::Off);
    }

    #[test]
    fn track_projects_from_song() {
        let mut song = Song::new("Sunrise over Lisbon").with_location("Lisbon");
        song.attach_audio("https://cdn.anthem.app/songs/lisbon.mp3");

        let track = QueueTrack::from(&song);
        assert_eq!(track.title, "Sunrise over Lisbon");
        assert_eq!(track.location.as_deref(), Some("Lisbon"));
        assert!(track.is_playable());
    }

    #[test]
    fn pending_song_projects_unplayable_track() {
        let song = Song::new("Still Rendering");
        let track = QueueTrack::from(&song);
        assert!(track.audio_uri.is_none());
        assert!(!track.is_playable());
    }
}
