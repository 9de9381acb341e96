use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One playable item in the playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier (also carried as `data-id` in the track list)
    pub id: u32,
    /// Track name
    pub name: String,
    /// Artist name(s)
    pub artist: String,
    /// Artwork image shown on the CD and in the track list
    #[serde(rename = "imgUrl")]
    pub artwork_url: String,
    /// Audio source handed to the media engine
    pub audio_url: String,
    /// Whether the user marked this track as a favorite
    #[serde(default, rename = "isFavorite")]
    pub favorite: bool,
}

impl Track {
    /// Create a new track
    pub fn new(
        id: u32,
        name: impl Into<String>,
        artist: impl Into<String>,
        artwork_url: impl Into<String>,
        audio_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            artist: artist.into(),
            artwork_url: artwork_url.into(),
            audio_url: audio_url.into(),
            favorite: false,
        }
    }
}

/// Fixed, ordered sequence of tracks loaded once at startup.
///
/// The order never changes; shuffling only moves the controller's index.
/// Only the per-track favorite flag is mutable.
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Build a playlist, validating that it is non-empty and ids are unique.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyPlaylist`] for an empty list and
    /// [`CoreError::DuplicateTrackId`] when two tracks share an id.
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(CoreError::EmptyPlaylist);
        }

        let mut seen = HashSet::with_capacity(tracks.len());
        for track in &tracks {
            if !seen.insert(track.id) {
                return Err(CoreError::DuplicateTrackId { id: track.id });
            }
        }

        Ok(Self { tracks })
    }

    /// Parse a JSON array of tracks.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails [`Playlist::new`] validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let tracks: Vec<Track> = serde_json::from_str(json)?;
        Self::new(tracks)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false for a validated playlist
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Find a track's index by its id
    #[must_use]
    pub fn index_of(&self, id: u32) -> Option<usize> {
        self.tracks.iter().position(|track| track.id == id)
    }

    /// Index after `index`, wrapping to the start
    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.len()
    }

    /// Index before `index`, wrapping to the end
    #[must_use]
    pub fn previous_index(&self, index: usize) -> usize {
        (index + self.len() - 1) % self.len()
    }

    /// Flip a track's favorite flag, returning the new value.
    pub fn toggle_favorite(&mut self, index: usize) -> Option<bool> {
        let track = self.tracks.get_mut(index)?;
        track.favorite = !track.favorite;
        Some(track.favorite)
    }
}
