//! Playback events
//!
//! Every controller mutation notifies subscribed consumers so the mini
//! player, full-screen player, and queue surfaces all observe the same state
//! without polling.

use crate::types::{PlaybackState, RepeatMode};
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state changed (playing, paused, stopped)
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// The current track changed
    TrackChanged {
        /// Id of the new current track, `None` when the queue emptied
        track_id: Option<String>,
        /// Id of the previously current track
        previous_track_id: Option<String>,
    },

    /// Queue contents changed (set, added, removed, reordered, cleared)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Volume or mute state changed
    VolumeChanged {
        /// Volume level (0.0-1.0)
        level: f32,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Shuffle toggled
    ShuffleChanged {
        /// Whether shuffle is now enabled
        enabled: bool,
    },

    /// Repeat mode changed
    RepeatChanged {
        /// The new repeat mode
        mode: RepeatMode,
    },

    /// Periodic position update from the media transport
    PositionUpdate {
        /// Current playback position
        position_ms: u64,
        /// Total track duration
        duration_ms: u64,
    },

    /// A track played to its natural end
    TrackFinished {
        /// Id of the finished track
        track_id: String,
    },

    /// A track was added to or removed from favorites
    FavoriteChanged {
        /// Id of the affected track
        track_id: String,
        /// Whether it is now a favorite
        is_favorite: bool,
    },

    /// A recoverable error occurred
    Error {
        /// Error message
        message: String,
    },
}

/// Handle returned by `PlayerController::subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize() {
        let event = PlaybackEvent::VolumeChanged {
            level: 0.7,
            is_muted: false,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("VolumeChanged"));

        let back: PlaybackEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
