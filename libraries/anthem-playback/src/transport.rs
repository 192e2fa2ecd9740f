//! Platform media transport seam
//!
//! The controller never touches audio itself; the surrounding platform loads
//! media for a track's `audio_uri` and hands the controller a transport
//! handle. On the web that wraps a native media element; in tests it is a
//! fixed-duration fake.

use crate::error::Result;
use std::time::Duration;

/// Handle to loaded media for the current track
///
/// Implementors report position/duration and accept seeks. Play/pause state
/// lives in the controller, not here; pausing is a platform concern driven by
/// `StateChanged` events.
pub trait MediaTransport: Send {
    /// Total media duration
    fn duration(&self) -> Duration;

    /// Current playback position
    fn position(&self) -> Duration;

    /// Seek to a position from the start of the media
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Whether the media has played to its end
    fn is_finished(&self) -> bool;
}

/// Fixed-duration transport for tests
///
/// Position only moves via `seek` and `advance`
#[cfg(test)]
pub(crate) struct FixedTransport {
    duration: Duration,
    position: Duration,
}

#[cfg(test)]
impl FixedTransport {
    pub(crate) fn new(duration: Duration) -> Self {
        Self {
            duration,
            position: Duration::ZERO,
        }
    }

    /// Simulate playback progress
    pub(crate) fn advance(&mut self, by: Duration) {
        self.position = (self.position + by).min(self.duration);
    }
}

#[cfg(test)]
impl MediaTransport for FixedTransport {
    fn duration(&self) -> Duration {
        self.duration
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        self.position = position.min(self.duration);
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.position >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_transport_tracks_position() {
        let mut transport = FixedTransport::new(Duration::from_secs(180));
        assert_eq!(transport.position(), Duration::ZERO);
        assert!(!transport.is_finished());

        transport.advance(Duration::from_secs(90));
        assert_eq!(transport.position(), Duration::from_secs(90));

        transport.advance(Duration::from_secs(200));
        assert_eq!(transport.position(), Duration::from_secs(180));
        assert!(transport.is_finished());
    }

    #[test]
    fn seek_clamps_to_duration() {
        let mut transport = FixedTransport::new(Duration::from_secs(60));
        transport.seek(Duration::from_secs(300)).unwrap();
        assert_eq!(transport.position(), Duration::from_secs(60));
    }
}
