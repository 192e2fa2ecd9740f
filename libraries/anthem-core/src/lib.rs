//! Anthem Core
//!
//! Domain types, identifiers, and error handling shared across Anthem's
//! playback and presentation layers.
//!
//! The central entity is the [`Song`]: a user's travel story rendered into a
//! generated track. Generation is asynchronous, so a song exists (and is
//! displayed) before its audio does — [`Song::is_playable`] is the gate the
//! playback layer checks before attempting to load media.
//!
//! # Example
//!
//! ```rust
//! use anthem_core::types::{GenerationStatus, Song};
//!
//! let mut song = Song::new("Sunrise over Lisbon");
//! assert!(!song.is_playable());
//!
//! song.attach_audio("https://cdn.anthem.app/songs/abc.mp3");
//! assert_eq!(song.status, GenerationStatus::Complete);
//! assert!(song.is_playable());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{GenerationStatus, Song, SongId};
