//! Anthem - Playback Management
//!
//! The playback queue controller behind every Anthem playback surface
//! (mini player, full-screen player, queue list, playlist controls).
//!
//! This crate provides:
//! - A flat, index-cursored track queue with targeted edits and reordering
//! - Shuffle as an index permutation (the queue is never reordered in place)
//! - Repeat modes (Off, All, One)
//! - Bounded navigation history backing "true previous track"
//! - Volume control with independent mute
//! - Session-local favorites
//! - Synchronous event broadcast to any number of subscribed consumers
//! - A stale-callback guard for asynchronous media events
//!
//! # Architecture
//!
//! `anthem-playback` is platform-agnostic: it never touches audio itself.
//! The surrounding platform loads media for the current track's `audio_uri`,
//! hands the controller a [`MediaTransport`], and forwards position ticks
//! and the media "ended" signal together with the [`PlayerController::epoch`]
//! captured at load time. Callbacks from superseded media are discarded.
//!
//! # Example
//!
//! ```rust
//! use anthem_playback::{PlayerConfig, PlayerController, QueueTrack, RepeatMode};
//!
//! let mut player = PlayerController::new(PlayerConfig::default());
//!
//! let tracks: Vec<QueueTrack> = ["roadtrip", "harbor", "night-market"]
//!     .iter()
//!     .map(|id| QueueTrack {
//!         id: (*id).to_string(),
//!         title: (*id).to_string(),
//!         audio_uri: Some(format!("https://cdn.anthem.app/songs/{id}.mp3")),
//!         genre: None,
//!         location: None,
//!         people: Vec::new(),
//!         artwork_uri: None,
//!     })
//!     .collect();
//!
//! player.set_queue(tracks, 0);
//! player.set_repeat(RepeatMode::All);
//! player.play().unwrap();
//!
//! player.next();
//! assert_eq!(player.current_index(), Some(1));
//! ```

mod controller;
mod error;
mod events;
mod history;
mod queue;
mod shuffle;
mod transport;
pub mod types;
mod volume;

// Public exports
pub use controller::PlayerController;
pub use error::{PlaybackError, Result};
pub use events::{PlaybackEvent, SubscriptionId};
pub use transport::MediaTransport;
pub use types::{PlaybackState, PlayerConfig, QueueTrack, RepeatMode};
