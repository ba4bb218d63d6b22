use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaylistError {
    #[error("select at least one track")]
    EmptySelection,
    #[error("no playlist with id {0}")]
    NotFound(String),
}

/// Ordered track ids; duplicates are allowed and the submitted order is
/// preserved exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub tracks: Vec<String>,
}

#[derive(Debug, Default, Clone)]
pub struct PlaylistStore {
    playlists: Vec<Playlist>,
}

impl PlaylistStore {
    pub fn new(playlists: Vec<Playlist>) -> Self {
        Self { playlists }
    }

    pub fn all(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    /// Create a playlist from an ordered id list. A blank name falls back to
    /// "Untitled"; an empty selection is an error. New playlists go first.
    pub fn create(&mut self, name: &str, tracks: Vec<String>) -> Result<&Playlist, PlaylistError> {
        if tracks.is_empty() {
            return Err(PlaylistError::EmptySelection);
        }

        let playlist = Playlist {
            id: Uuid::new_v4().to_string(),
            name: display_name(name),
            tracks,
        };
        self.playlists.insert(0, playlist);
        Ok(&self.playlists[0])
    }

    /// Replace name and track order in place.
    pub fn update(
        &mut self,
        id: &str,
        name: &str,
        tracks: Vec<String>,
    ) -> Result<(), PlaylistError> {
        if tracks.is_empty() {
            return Err(PlaylistError::EmptySelection);
        }

        let playlist = self
            .playlists
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PlaylistError::NotFound(id.to_string()))?;
        playlist.name = display_name(name);
        playlist.tracks = tracks;
        Ok(())
    }

    /// Remove a playlist. Returns whether anything was deleted. The caller
    /// is responsible for resetting an active filter that referenced it.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.playlists.len();
        self.playlists.retain(|p| p.id != id);
        self.playlists.len() != before
    }
}

fn display_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() { "Untitled" } else { name }.to_string()
}
