//! Shuffle order generation
//!
//! The queue is never reordered in place; shuffle produces a permutation of
//! track indices that defines the traversal order while shuffle is active.

use rand::seq::SliceRandom;
use rand::thread_rng;

/// Generate a random permutation of `0..len` (Fisher-Yates)
pub fn shuffled_indices(len: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(&mut thread_rng());
    order
}
