//! Filter selection and queue resolution.
//!
//! `resolve` derives the ordered playback queue from the active filter. It
//! is pure and must be re-run after every mutation of the library, the
//! playlist store, or the filter itself.

use crate::library::{Category, Library};
use crate::playlist::PlaylistStore;

/// What the queue is derived from: the whole library, one category, or one
/// named playlist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Category(Category),
    Playlist(String),
}

impl Filter {
    /// Human-readable label for the status line.
    pub fn label(&self, playlists: &PlaylistStore) -> String {
        match self {
            Filter::All => "All".to_string(),
            Filter::Category(c) => c.as_str().to_string(),
            Filter::Playlist(id) => playlists
                .get(id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "?".to_string()),
        }
    }
}

/// Derive the ordered queue of track ids for `filter`.
///
/// Playlist resolution maps each stored id through the library, dropping
/// ids that no longer resolve; an unknown playlist yields an empty queue.
/// Every id in the result is present in `library` at call time.
pub fn resolve(filter: &Filter, library: &Library, playlists: &PlaylistStore) -> Vec<String> {
    match filter {
        Filter::All => library.list_all().iter().map(|t| t.id().to_string()).collect(),
        Filter::Category(category) => library
            .list_all()
            .iter()
            .filter(|t| t.category() == *category)
            .map(|t| t.id().to_string())
            .collect(),
        Filter::Playlist(id) => match playlists.get(id) {
            None => Vec::new(),
            Some(pl) => pl
                .tracks
                .iter()
                .filter(|id| library.contains(id))
                .cloned()
                .collect(),
        },
    }
}
