/// Song domain type
use crate::types::SongId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generation status of a song's media
///
/// A song row exists as soon as the story is submitted; audio and artwork
/// arrive later from the generation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// Story submitted, generation not started
    Pending,

    /// Generation in progress
    Processing,

    /// Audio (and artwork) available
    Complete,

    /// Generation failed; the song has no playable media
    Failed,
}

/// A generated song
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Unique song identifier
    pub id: SongId,

    /// Song title
    pub title: String,

    /// Musical genre chosen for generation
    pub genre: Option<String>,

    /// Trip location the story is about
    pub location: Option<String>,

    /// People mentioned in the story
    #[serde(default)]
    pub people: Vec<String>,

    /// Locator for the generated audio; absent while generation is pending
    pub audio_url: Option<String>,

    /// Locator for the generated album artwork
    pub artwork_url: Option<String>,

    /// Media generation status
    pub status: GenerationStatus,

    /// When the song was created
    pub created_at: DateTime<Utc>,
}

impl Song {
    /// Create a new song with minimal metadata, pending generation
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: SongId::generate(),
            title: title.into(),
            genre: None,
            location: None,
            people: Vec::new(),
            audio_url: None,
            artwork_url: None,
            status: GenerationStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Set the genre
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Set the trip location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the people featured in the story
    pub fn with_people(mut self, people: Vec<String>) -> Self {
        self.people = people;
        self
    }

    /// Attach generated audio, marking the song complete
    pub fn attach_audio(&mut self, url: impl Into<String>) {
        self.audio_url = Some(url.into());
        self.status = GenerationStatus::Complete;
    }

    /// Attach generated artwork
    pub fn attach_artwork(&mut self, url: impl Into<String>) {
        self.artwork_url = Some(url.into());
    }

    /// Whether the song has playable media
    pub fn is_playable(&self) -> bool {
        self.status == GenerationStatus::Complete && self.audio_url.is_some()
    }
}
