//! Domain types for Anthem

mod ids;
mod song;

pub use ids::SongId;
pub use song::{GenerationStatus, Song};
