//! Queue state: ordered track list, play cursor, shuffle permutation
//!
//! The track list is never reordered by shuffle. While shuffle is active a
//! permutation of indices defines traversal order; turning shuffle off
//! discards it and navigation reverts to positional order.

use crate::shuffle::shuffled_indices;
use crate::types::{QueueTrack, RepeatMode};

/// Ordered track list plus current-position cursor
///
/// Invariants, maintained by every operation:
/// - `current` is `Some(i)` with `i < tracks.len()`, or `None` iff no track
///   is loaded (always `None` when the queue is empty)
/// - `shuffled_order`, when present, is a permutation of `0..tracks.len()`
#[derive(Debug, Clone)]
pub struct Queue {
    /// Tracks in insertion order (= playback order unless shuffled)
    tracks: Vec<QueueTrack>,

    /// Index of the current track
    current: Option<usize>,

    /// Traversal order while shuffle is enabled
    shuffled_order: Option<Vec<usize>>,
}

impl Queue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            current: None,
            shuffled_order: None,
        }
    }

    /// Replace the track list wholesale
    ///
    /// `start_index` clamps to the valid range; an empty `tracks` leaves
    /// nothing loaded. A fresh permutation is computed if shuffle is active.
    pub fn set_tracks(&mut self, tracks: Vec<QueueTrack>, start_index: usize) {
        self.tracks = tracks;
        self.current = if self.tracks.is_empty() {
            None
        } else {
            Some(start_index.min(self.tracks.len() - 1))
        };
        if self.shuffled_order.is_some() {
            self.shuffled_order = Some(shuffled_indices(self.tracks.len()));
        }
    }

    /// Append a track to the end of the queue
    ///
    /// The cursor is untouched. Under shuffle the new index joins the tail
    /// of the permutation.
    pub fn push(&mut self, track: QueueTrack) {
        self.tracks.push(track);
        if let Some(ref mut order) = self.shuffled_order {
            order.push(self.tracks.len() - 1);
        }
    }

    /// Remove the track at `index`
    ///
    /// Out-of-range indices are a no-op. Removing a track before the cursor
    /// shifts the cursor down so it keeps pointing at the same track.
    /// Removing the current track leaves the cursor at the same position,
    /// now referring to the next track by position (clamped to the new last
    /// index); emptying the queue clears the cursor.
    pub fn remove(&mut self, index: usize) -> Option<QueueTrack> {
        if index >= self.tracks.len() {
            return None;
        }

        let removed = self.tracks.remove(index);

        self.current = match self.current {
            Some(cur) if index < cur => Some(cur - 1),
            Some(cur) if index == cur => {
                if self.tracks.is_empty() {
                    None
                } else {
                    Some(cur.min(self.tracks.len() - 1))
                }
            }
            other => other,
        };

        if let Some(ref mut order) = self.shuffled_order {
            order.retain(|&i| i != index);
            for slot in order.iter_mut() {
                if *slot > index {
                    *slot -= 1;
                }
            }
        }

        Some(removed)
    }

    /// Move the track at `from` to position `to`
    ///
    /// Out-of-range indices are a no-op. The cursor and the shuffle
    /// permutation follow track identity, not position.
    pub fn move_track(&mut self, from: usize, to: usize) {
        if from >= self.tracks.len() || to >= self.tracks.len() || from == to {
            return;
        }

        let track = self.tracks.remove(from);
        self.tracks.insert(to, track);

        if let Some(cur) = self.current {
            self.current = Some(Self::remap_after_move(cur, from, to));
        }
        if let Some(ref mut order) = self.shuffled_order {
            for slot in order.iter_mut() {
                *slot = Self::remap_after_move(*slot, from, to);
            }
        }
    }

    /// Where index `i` lands after the track at `from` moves to `to`
    pub(crate) fn remap_after_move(i: usize, from: usize, to: usize) -> usize {
        if i == from {
            to
        } else if from < to && i > from && i <= to {
            i - 1
        } else if to < from && i >= to && i < from {
            i + 1
        } else {
            i
        }
    }

    /// Empty the queue
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current = None;
        if self.shuffled_order.is_some() {
            self.shuffled_order = Some(Vec::new());
        }
    }

    /// Enable or disable shuffle
    ///
    /// Enabling computes a fresh random permutation over the current track
    /// count; disabling discards it.
    pub fn set_shuffled(&mut self, enabled: bool) {
        self.shuffled_order = if enabled {
            Some(shuffled_indices(self.tracks.len()))
        } else {
            None
        };
    }

    /// Check if shuffle is enabled
    pub fn is_shuffled(&self) -> bool {
        self.shuffled_order.is_some()
    }

    /// The active shuffle permutation, if shuffle is enabled
    pub fn shuffled_order(&self) -> Option<&[usize]> {
        self.shuffled_order.as_deref()
    }

    /// Compute the next index in traversal order
    ///
    /// Returns `None` when nothing is loaded, or when `repeat` is `Off` and
    /// the current track is the last in traversal order (positional last, or
    /// last permutation slot under shuffle). `One` and `All` both wrap; `One`
    /// only changes behavior on natural track end, which the controller
    /// handles before consulting the queue.
    pub fn next_index(&self, repeat: RepeatMode) -> Option<usize> {
        let current = self.current?;
        let len = self.tracks.len();

        match self.shuffled_order {
            Some(ref order) => {
                let pos = order.iter().position(|&i| i == current)?;
                if repeat == RepeatMode::Off && pos + 1 == len {
                    None
                } else {
                    Some(order[(pos + 1) % len])
                }
            }
            None => {
                if repeat == RepeatMode::Off && current + 1 == len {
                    None
                } else {
                    Some((current + 1) % len)
                }
            }
        }
    }

    /// Compute the previous index in traversal order, wrapping at the front
    pub fn prev_index(&self) -> Option<usize> {
        let current = self.current?;
        let len = self.tracks.len();

        match self.shuffled_order {
            Some(ref order) => {
                let pos = order.iter().position(|&i| i == current)?;
                Some(order[(pos + len - 1) % len])
            }
            None => Some(if current == 0 { len - 1 } else { current - 1 }),
        }
    }

    /// Move the cursor to `index`
    ///
    /// Out-of-range indices are a no-op
    pub fn set_current(&mut self, index: usize) {
        if index < self.tracks.len() {
            self.current = Some(index);
        }
    }

    /// Index of the current track
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// The current track
    pub fn current_track(&self) -> Option<&QueueTrack> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&QueueTrack> {
        self.tracks.get(index)
    }

    /// All tracks in insertion order
    pub fn tracks(&self) -> &[QueueTrack] {
        &self.tracks
    }

    /// Number of tracks in the queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn create_test_track(id: &str) -> QueueTrack {
        QueueTrack {
            id: id.to_string(),
            title: format!("Track {}", id),
            audio_uri: Some(format!("https://cdn.anthem.app/songs/{}.mp3", id)),
            genre: None,
            location: None,
            people: Vec::new(),
            artwork_uri: None,
        }
    }

    fn tracks(ids: &[&str]) -> Vec<QueueTrack> {
        ids.iter().map(|id| create_test_track(id)).collect()
    }

    #[test]
    fn empty_queue_has_no_current() {
        let queue = Queue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.current_index(), None);
        assert_eq!(queue.next_index(RepeatMode::All), None);
        assert_eq!(queue.prev_index(), None);
    }

    #[test]
    fn set_tracks_positions_cursor() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a", "b", "c"]), 1);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.current_index(), Some(1));
        assert_eq!(queue.current_track().unwrap().id, "b");
    }

    #[test]
    fn set_tracks_clamps_start_index() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a", "b"]), 99);
        assert_eq!(queue.current_index(), Some(1));
    }

    #[test]
    fn set_tracks_empty_clears_cursor() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a"]), 0);
        queue.set_tracks(Vec::new(), 0);
        assert_eq!(queue.current_index(), None);
    }

    #[test]
    fn push_leaves_cursor_alone() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a", "b"]), 1);
        queue.push(create_test_track("c"));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.current_index(), Some(1));
    }

    #[test]
    fn next_wraps_with_repeat_all() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a", "b", "c"]), 2);

        assert_eq!(queue.next_index(RepeatMode::All), Some(0));
    }

    #[test]
    fn next_stops_at_end_with_repeat_off() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a", "b", "c"]), 2);

        assert_eq!(queue.next_index(RepeatMode::Off), None);
        assert_eq!(queue.next_index(RepeatMode::One), Some(0));
    }

    #[test]
    fn prev_wraps_at_front() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a", "b", "c"]), 0);

        assert_eq!(queue.prev_index(), Some(2));
    }

    #[test]
    fn remove_before_cursor_shifts_it_down() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a", "b", "c"]), 1);

        let removed = queue.remove(0).unwrap();
        assert_eq!(removed.id, "a");
        assert_eq!(queue.current_index(), Some(0));
        assert_eq!(queue.current_track().unwrap().id, "b");
    }

    #[test]
    fn remove_current_points_at_next_by_position() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a", "b", "c"]), 1);

        queue.remove(1);
        assert_eq!(queue.current_index(), Some(1));
        assert_eq!(queue.current_track().unwrap().id, "c");
    }

    #[test]
    fn remove_current_at_end_clamps_to_last() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a", "b", "c"]), 2);

        queue.remove(2);
        assert_eq!(queue.current_index(), Some(1));
        assert_eq!(queue.current_track().unwrap().id, "b");
    }

    #[test]
    fn remove_last_track_empties_cursor() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a"]), 0);

        queue.remove(0);
        assert!(queue.is_empty());
        assert_eq!(queue.current_index(), None);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a"]), 0);

        assert!(queue.remove(5).is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn shuffle_order_is_valid_permutation() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a", "b", "c", "d", "e"]), 0);
        queue.set_shuffled(true);

        let order = queue.shuffled_order().unwrap();
        let unique: HashSet<usize> = order.iter().copied().collect();
        assert_eq!(order.len(), 5);
        assert_eq!(unique.len(), 5);
        assert!(order.iter().all(|&i| i < 5));
    }

    #[test]
    fn shuffle_traversal_visits_every_track_once() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a", "b", "c", "d"]), 0);
        queue.set_shuffled(true);

        let mut visited = HashSet::new();
        visited.insert(queue.current_index().unwrap());
        for _ in 0..3 {
            let next = queue.next_index(RepeatMode::All).unwrap();
            queue.set_current(next);
            visited.insert(next);
        }
        assert_eq!(visited.len(), 4);
    }

    #[test]
    fn shuffle_next_off_stops_at_last_permutation_slot() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a", "b", "c"]), 0);
        queue.set_shuffled(true);

        // Walk to the final permutation slot
        let last = *queue.shuffled_order().unwrap().last().unwrap();
        queue.set_current(last);

        assert_eq!(queue.next_index(RepeatMode::Off), None);
    }

    #[test]
    fn shuffle_prev_is_permutation_predecessor() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a", "b", "c", "d"]), 0);
        queue.set_shuffled(true);

        let order: Vec<usize> = queue.shuffled_order().unwrap().to_vec();
        queue.set_current(order[2]);
        assert_eq!(queue.prev_index(), Some(order[1]));

        // Wraps from the first slot to the last
        queue.set_current(order[0]);
        assert_eq!(queue.prev_index(), Some(order[3]));
    }

    #[test]
    fn disabling_shuffle_restores_positional_order() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a", "b", "c"]), 0);
        queue.set_shuffled(true);
        queue.set_shuffled(false);

        assert!(queue.shuffled_order().is_none());
        assert_eq!(queue.next_index(RepeatMode::All), Some(1));
    }

    #[test]
    fn push_under_shuffle_keeps_permutation_valid() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a", "b", "c"]), 0);
        queue.set_shuffled(true);

        queue.push(create_test_track("d"));

        let order = queue.shuffled_order().unwrap();
        let unique: HashSet<usize> = order.iter().copied().collect();
        assert_eq!(order.len(), 4);
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn remove_under_shuffle_renumbers_permutation() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a", "b", "c", "d"]), 0);
        queue.set_shuffled(true);

        queue.remove(1);

        let order = queue.shuffled_order().unwrap();
        let unique: HashSet<usize> = order.iter().copied().collect();
        assert_eq!(order.len(), 3);
        assert_eq!(unique.len(), 3);
        assert!(order.iter().all(|&i| i < 3));
    }

    #[test]
    fn move_track_follows_identity() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a", "b", "c", "d"]), 1);

        queue.move_track(1, 3);
        assert_eq!(queue.current_index(), Some(3));
        assert_eq!(queue.current_track().unwrap().id, "b");

        let ids: Vec<&str> = queue.tracks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d", "b"]);
    }

    #[test]
    fn move_track_backwards_shifts_between() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a", "b", "c", "d"]), 1);

        queue.move_track(3, 0);
        assert_eq!(queue.current_track().unwrap().id, "b");
        assert_eq!(queue.current_index(), Some(2));

        let ids: Vec<&str> = queue.tracks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "a", "b", "c"]);
    }

    #[test]
    fn move_track_under_shuffle_keeps_permutation_valid() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a", "b", "c", "d", "e"]), 0);
        queue.set_shuffled(true);

        queue.move_track(0, 4);

        let order = queue.shuffled_order().unwrap();
        let unique: HashSet<usize> = order.iter().copied().collect();
        assert_eq!(order.len(), 5);
        assert_eq!(unique.len(), 5);
        assert!(order.iter().all(|&i| i < 5));
    }

    #[test]
    fn clear_resets_everything() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(&["a", "b"]), 0);
        queue.set_shuffled(true);

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.current_index(), None);
        assert!(queue.is_shuffled());
        assert!(queue.shuffled_order().unwrap().is_empty());
    }
}
