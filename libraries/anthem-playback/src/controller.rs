//! Player controller - core orchestration
//!
//! Coordinates queue, history, volume, and transport state, and broadcasts
//! every mutation to subscribed consumers. One instance is shared by all
//! presentation surfaces for the lifetime of an application session; tests
//! construct isolated instances.

use crate::{
    error::{PlaybackError, Result},
    events::{PlaybackEvent, SubscriptionId},
    history::History,
    queue::Queue,
    transport::MediaTransport,
    types::{PlaybackState, PlayerConfig, QueueTrack, RepeatMode},
    volume::Volume,
};

use std::collections::HashSet;
use std::time::Duration;
use tracing::debug;

/// "Previous" restarts the current track instead of navigating when playback
/// is further in than this
const RESTART_THRESHOLD: Duration = Duration::from_secs(3);

type Listener = Box<dyn FnMut(&PlaybackEvent) + Send>;

/// Central playback controller
///
/// Single source of truth for what track set is loaded, which track is
/// current, and in what mode. All mutations are synchronous; every
/// subscriber observes the same post-mutation snapshot.
///
/// Asynchronous platform callbacks (`handle_position_tick`,
/// `handle_track_ended`) carry the epoch captured when their media was
/// loaded; callbacks from superseded media are discarded rather than allowed
/// to corrupt the current queue.
pub struct PlayerController {
    // State
    state: PlaybackState,
    position: Duration,
    duration: Duration,

    // Queue and history
    queue: Queue,
    history: History,

    // Settings
    volume: Volume,
    repeat: RepeatMode,

    // Session-local favorites (no playback effect)
    favorites: HashSet<String>,

    // Generation counter for stale-callback detection
    epoch: u64,

    // Platform media handle for the current track
    transport: Option<Box<dyn MediaTransport>>,

    // Event delivery
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    pending_events: Vec<PlaybackEvent>,
}

impl PlayerController {
    /// Create a new player controller
    pub fn new(config: PlayerConfig) -> Self {
        let mut queue = Queue::new();
        if config.shuffle {
            queue.set_shuffled(true);
        }

        Self {
            state: PlaybackState::Stopped,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            queue,
            history: History::new(config.history_size),
            volume: Volume::new(config.volume),
            repeat: config.repeat,
            favorites: HashSet::new(),
            epoch: 0,
            transport: None,
            listeners: Vec::new(),
            next_subscription: 0,
            pending_events: Vec::new(),
        }
    }

    // ===== Queue Management =====

    /// Replace the active track list
    ///
    /// Sets the cursor to `start_index` (clamped), recomputes the shuffle
    /// permutation if shuffle is enabled, clears history, and invalidates
    /// callbacks from any previously loaded media.
    pub fn set_queue(&mut self, tracks: Vec<QueueTrack>, start_index: usize) {
        let previous_track_id = self.queue.current_track().map(|t| t.id.clone());

        self.queue.set_tracks(tracks, start_index);
        self.history.clear();
        self.bump_epoch();
        self.detach_transport();
        debug!(length = self.queue.len(), "queue replaced");

        if self.queue.is_empty() && self.state != PlaybackState::Stopped {
            self.state = PlaybackState::Stopped;
            self.emit(PlaybackEvent::StateChanged {
                state: PlaybackState::Stopped,
            });
        }

        self.emit(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
        let track_id = self.queue.current_track().map(|t| t.id.clone());
        self.emit(PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id,
        });
    }

    /// Append a track to the end of the queue
    ///
    /// Does not alter the cursor or history
    pub fn add_to_queue(&mut self, track: QueueTrack) {
        self.queue.push(track);
        self.emit(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    /// Remove the track at `index`
    ///
    /// Out-of-range indices are a no-op. Removing a track before the cursor
    /// keeps the current track's identity. Removing the current track leaves
    /// the cursor pointing at the next track by position (clamped to the new
    /// end); emptying the queue stops playback.
    pub fn remove_from_queue(&mut self, index: usize) -> Option<QueueTrack> {
        let was_current = self.queue.current_index() == Some(index);
        let removed = self.queue.remove(index)?;

        // Keep history pointing at the same tracks
        self.history.remap(|i| {
            if i == index {
                None
            } else if i > index {
                Some(i - 1)
            } else {
                Some(i)
            }
        });

        if was_current {
            self.bump_epoch();
            self.detach_transport();

            if self.queue.is_empty() && self.state != PlaybackState::Stopped {
                self.state = PlaybackState::Stopped;
                self.emit(PlaybackEvent::StateChanged {
                    state: PlaybackState::Stopped,
                });
            }

            let track_id = self.queue.current_track().map(|t| t.id.clone());
            self.emit(PlaybackEvent::TrackChanged {
                track_id,
                previous_track_id: Some(removed.id.clone()),
            });
        }

        self.emit(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
        Some(removed)
    }

    /// Move the track at `from` to position `to` (queue reordering)
    pub fn move_track(&mut self, from: usize, to: usize) {
        if from >= self.queue.len() || to >= self.queue.len() || from == to {
            return;
        }

        self.queue.move_track(from, to);
        self.history
            .remap(|i| Some(Queue::remap_after_move(i, from, to)));
        self.emit(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    /// Empty the queue and stop playback
    pub fn clear_queue(&mut self) {
        let previous_track_id = self.queue.current_track().map(|t| t.id.clone());

        self.queue.clear();
        self.history.clear();
        self.bump_epoch();
        self.detach_transport();

        if self.state != PlaybackState::Stopped {
            self.state = PlaybackState::Stopped;
            self.emit(PlaybackEvent::StateChanged {
                state: PlaybackState::Stopped,
            });
        }
        self.emit(PlaybackEvent::QueueChanged { length: 0 });
        self.emit(PlaybackEvent::TrackChanged {
            track_id: None,
            previous_track_id,
        });
    }

    // ===== Playback Control =====

    /// Start or resume playback
    ///
    /// A silent no-op when nothing is loaded. Returns
    /// [`PlaybackError::MediaPending`] when the current track's media has
    /// not been generated yet; the UI shows a "still generating" state.
    pub fn play(&mut self) -> Result<()> {
        let (track_id, playable) = match self.queue.current_track() {
            None => {
                debug!("play ignored: no track loaded");
                return Ok(());
            }
            Some(track) => (track.id.clone(), track.audio_uri.is_some()),
        };

        if !playable {
            self.emit(PlaybackEvent::Error {
                message: format!("media not ready for track {track_id}"),
            });
            return Err(PlaybackError::MediaPending { track_id });
        }

        if self.state != PlaybackState::Playing {
            self.state = PlaybackState::Playing;
            self.emit(PlaybackEvent::StateChanged {
                state: PlaybackState::Playing,
            });
        }
        Ok(())
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
            self.emit(PlaybackEvent::StateChanged {
                state: PlaybackState::Paused,
            });
        }
    }

    /// Skip to the next track in traversal order
    ///
    /// Pushes the departed index onto history. When `repeat` is `Off` and
    /// the current track is the last in traversal order, pauses instead and
    /// leaves the cursor and history untouched.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        let Some(current) = self.queue.current_index() else {
            return;
        };

        match self.queue.next_index(self.repeat) {
            None => {
                debug!("end of queue with repeat off, pausing");
                self.pause();
            }
            Some(next) => {
                self.history.push(current);
                self.load_index(next);
            }
        }
    }

    /// Go to the previous track
    ///
    /// More than three seconds into the current track this restarts it
    /// (scrub back) instead of navigating. Otherwise the most recent history
    /// entry wins; with empty history, falls back to the traversal-order
    /// predecessor, wrapping from the first track to the last.
    pub fn previous(&mut self) {
        if self.position > RESTART_THRESHOLD {
            self.seek(Duration::ZERO);
            return;
        }

        if let Some(index) = self.history.pop() {
            self.load_index(index);
        } else if let Some(prev) = self.queue.prev_index() {
            self.load_index(prev);
        }
    }

    /// Jump directly to the queue entry at `index`
    ///
    /// Out-of-range indices are a no-op; jumping to the current track
    /// restarts it.
    pub fn play_track_at(&mut self, index: usize) {
        if index >= self.queue.len() {
            return;
        }
        if self.queue.current_index() == Some(index) {
            self.seek(Duration::ZERO);
            return;
        }

        if let Some(current) = self.queue.current_index() {
            self.history.push(current);
        }
        self.load_index(index);
    }

    /// Seek within the current track
    ///
    /// Clamped to the media duration; total (a transport failure surfaces as
    /// an `Error` event, never a panic)
    pub fn seek(&mut self, position: Duration) {
        let clamped = position.min(self.duration);

        let result = match self.transport.as_mut() {
            Some(transport) => transport.seek(clamped),
            None => Ok(()),
        };
        if let Err(e) = result {
            self.emit(PlaybackEvent::Error {
                message: e.to_string(),
            });
            return;
        }

        self.position = clamped;
        self.emit_position_update();
    }

    // ===== Volume =====

    /// Set volume (clamped to 0.0-1.0); raising above zero implicitly unmutes
    pub fn set_volume(&mut self, level: f32) {
        self.volume.set_level(level);
        self.emit_volume_changed();
    }

    /// Toggle mute without touching the stored volume level
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.emit_volume_changed();
    }

    // ===== Shuffle & Repeat =====

    /// Toggle shuffle
    ///
    /// Turning shuffle on computes a fresh random permutation over the
    /// current tracks; turning it off reverts navigation to positional order
    pub fn toggle_shuffle(&mut self) {
        let enabled = !self.queue.is_shuffled();
        self.queue.set_shuffled(enabled);
        self.emit(PlaybackEvent::ShuffleChanged { enabled });
    }

    /// Set repeat mode; no side effects on cursor or history
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
        self.emit(PlaybackEvent::RepeatChanged { mode });
    }

    // ===== Favorites =====

    /// Add or remove a track from the session-local favorites set
    ///
    /// Returns whether the track is now a favorite
    pub fn toggle_favorite(&mut self, track_id: &str) -> bool {
        let is_favorite = if self.favorites.remove(track_id) {
            false
        } else {
            self.favorites.insert(track_id.to_string());
            true
        };
        self.emit(PlaybackEvent::FavoriteChanged {
            track_id: track_id.to_string(),
            is_favorite,
        });
        is_favorite
    }

    /// Check if a track is a favorite
    pub fn is_favorite(&self, track_id: &str) -> bool {
        self.favorites.contains(track_id)
    }

    // ===== Platform Callbacks =====

    /// Attach loaded media for the current track (called by the platform)
    pub fn set_transport(&mut self, transport: Box<dyn MediaTransport>) {
        self.duration = transport.duration();
        self.position = transport.position();
        self.transport = Some(transport);
        self.emit_position_update();
    }

    /// Periodic position update from the media transport
    ///
    /// `epoch` is the value of [`Self::epoch`] captured when the reporting
    /// media was loaded; ticks from superseded media are discarded.
    pub fn handle_position_tick(&mut self, epoch: u64, position: Duration, duration: Duration) {
        if epoch != self.epoch {
            debug!(expected = self.epoch, received = epoch, "discarding stale position tick");
            return;
        }

        self.duration = duration;
        self.position = position.min(duration);
        self.emit_position_update();
    }

    /// The current track's media signalled it finished
    ///
    /// Stale events from superseded media are discarded. With repeat `One`
    /// the track restarts; otherwise this behaves exactly like [`Self::next`]
    pub fn handle_track_ended(&mut self, epoch: u64) {
        if epoch != self.epoch {
            debug!(expected = self.epoch, received = epoch, "discarding stale track-ended event");
            return;
        }
        let Some(track) = self.queue.current_track() else {
            return;
        };
        let track_id = track.id.clone();
        self.emit(PlaybackEvent::TrackFinished { track_id });

        if self.repeat == RepeatMode::One {
            self.seek(Duration::ZERO);
            return;
        }
        self.next();
    }

    // ===== State Queries =====

    /// Current playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// The current track
    pub fn current_track(&self) -> Option<&QueueTrack> {
        self.queue.current_track()
    }

    /// Index of the current track
    pub fn current_index(&self) -> Option<usize> {
        self.queue.current_index()
    }

    /// All queued tracks in insertion order
    pub fn queue_tracks(&self) -> &[QueueTrack] {
        self.queue.tracks()
    }

    /// Queue length
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Current playback position
    pub fn position(&self) -> Duration {
        self.position
    }

    /// Current track duration
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Volume level (0.0-1.0); unaffected by mute
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    /// Effective gain for the media element (0.0 while muted)
    pub fn gain(&self) -> f32 {
        self.volume.gain()
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Check if shuffle is enabled
    pub fn is_shuffled(&self) -> bool {
        self.queue.is_shuffled()
    }

    /// The active shuffle permutation, if shuffle is enabled
    pub fn shuffled_order(&self) -> Option<&[usize]> {
        self.queue.shuffled_order()
    }

    /// Current repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// History of departed-from indices, oldest first
    pub fn history_entries(&self) -> Vec<usize> {
        self.history.entries()
    }

    /// Whether a next track exists in traversal order
    pub fn has_next(&self) -> bool {
        self.queue.next_index(self.repeat).is_some()
    }

    /// Whether "previous" can navigate (history or wrap target exists)
    pub fn has_previous(&self) -> bool {
        !self.history.is_empty() || !self.queue.is_empty()
    }

    /// Current media generation counter
    ///
    /// Platform code captures this when loading media and passes it back
    /// with position ticks and track-ended callbacks
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    // ===== Events =====

    /// Register a consumer to be notified synchronously after each mutation
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&PlaybackEvent) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(callback)));
        id
    }

    /// Remove a previously registered consumer
    ///
    /// Returns whether the subscription existed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Drain all events emitted since the last drain (for poll-style consumers)
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internal =====

    /// Move the cursor to `index` and invalidate the previous media
    fn load_index(&mut self, index: usize) {
        let previous_track_id = self.queue.current_track().map(|t| t.id.clone());

        self.queue.set_current(index);
        self.bump_epoch();
        self.detach_transport();

        let track_id = self.queue.current_track().map(|t| t.id.clone());
        self.emit(PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id,
        });
    }

    fn bump_epoch(&mut self) {
        self.epoch += 1;
    }

    fn detach_transport(&mut self) {
        self.transport = None;
        self.position = Duration::ZERO;
        self.duration = Duration::ZERO;
    }

    fn emit(&mut self, event: PlaybackEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
        self.pending_events.push(event);
    }

    fn emit_volume_changed(&mut self) {
        let level = self.volume.level();
        let is_muted = self.volume.is_muted();
        self.emit(PlaybackEvent::VolumeChanged { level, is_muted });
    }

    fn emit_position_update(&mut self) {
        let position_ms = self.position.as_millis() as u64;
        let duration_ms = self.duration.as_millis() as u64;
        self.emit(PlaybackEvent::PositionUpdate {
            position_ms,
            duration_ms,
        });
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}
