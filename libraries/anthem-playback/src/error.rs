//! Error types for the playback controller

use thiserror::Error;

/// Playback errors
///
/// Nearly every controller operation is total over its clamped input domain;
/// the variants here cover the few genuinely reportable conditions.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Play was attempted on a track whose media has not been generated yet
    #[error("Media not ready for track {track_id}")]
    MediaPending {
        /// Id of the track without a media locator
        track_id: String,
    },

    /// The underlying media transport failed
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
