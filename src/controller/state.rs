use rand::Rng;
use rand::seq::IndexedRandom;

use crate::library::{Library, Track};
use crate::playlist::PlaylistStore;
use crate::queue::{self, Filter};

/// What to do after the current track finishes.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Restart the track that just ended.
    Replay,
    /// Start this track next.
    Play(Track),
    /// Clear the current track and go idle.
    Stop,
    /// Keep the current selection but start nothing.
    Hold,
}

/// Tracks what is selected for playback: the active filter, the queue it
/// resolves to, and the position of the current track within it.
///
/// The queue is a snapshot. Sequential advancement walks the snapshot
/// taken when the current track started; shuffle re-resolves the filter at
/// decision time, so it always draws from the live filtered set.
#[derive(Debug)]
pub struct Controller {
    current: Option<Track>,
    queue: Vec<String>,
    current_index: Option<usize>,
    filter: Filter,
    pub loop_on: bool,
    pub shuffle: bool,
    pub volume: f32,
}

impl Controller {
    pub fn new(loop_on: bool, shuffle: bool, volume: f32) -> Self {
        Self {
            current: None,
            queue: Vec::new(),
            current_index: None,
            filter: Filter::default(),
            loop_on,
            shuffle,
            volume,
        }
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn queue(&self) -> &[String] {
        &self.queue
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Re-resolve the queue from the active filter. The current track is
    /// kept even when it falls outside the new queue; its index is simply
    /// cleared so sequential advancement restarts from the queue head.
    pub fn refresh_queue(&mut self, library: &Library, playlists: &PlaylistStore) {
        self.queue = queue::resolve(&self.filter, library, playlists);
        self.current_index = match &self.current {
            Some(track) => self.queue.iter().position(|id| id == track.id()),
            None => None,
        };
    }

    pub fn set_filter(&mut self, filter: Filter, library: &Library, playlists: &PlaylistStore) {
        self.filter = filter;
        self.refresh_queue(library, playlists);
    }

    /// React to a playlist deletion: if it was the active filter, fall back
    /// to the full library.
    pub fn playlist_deleted(
        &mut self,
        playlist_id: &str,
        library: &Library,
        playlists: &PlaylistStore,
    ) {
        if self.filter == Filter::Playlist(playlist_id.to_string()) {
            self.set_filter(Filter::All, library, playlists);
        }
    }

    /// Make `track` the current one and anchor the queue position on it.
    pub fn select(&mut self, track: Track) {
        self.current_index = self.queue.iter().position(|id| id == track.id());
        self.current = Some(track);
    }

    pub fn clear_current(&mut self) {
        self.current = None;
        self.current_index = None;
    }

    /// Whether `id` is the track playback currently belongs to. End-of-track
    /// reports carry the id they ended; a report for anything else is stale
    /// and must be dropped.
    pub fn is_current(&self, id: &str) -> bool {
        self.current.as_ref().is_some_and(|t| t.id() == id)
    }

    /// Decide what plays after the current track ends.
    ///
    /// Precedence: loop beats shuffle beats sequential. Shuffle draws from
    /// the filter as it resolves right now; sequential walks the queue
    /// snapshot and wraps past the end to the first entry.
    pub fn decide_after_end<R: Rng>(
        &mut self,
        rng: &mut R,
        library: &Library,
        playlists: &PlaylistStore,
    ) -> Advance {
        if self.loop_on && self.current.is_some() {
            return Advance::Replay;
        }

        if self.shuffle {
            let pool = queue::resolve(&self.filter, library, playlists);
            let Some(id) = pool.choose(rng) else {
                return Advance::Hold;
            };
            return match library.get(id) {
                Some(track) => {
                    self.select(track.clone());
                    Advance::Play(track)
                }
                None => Advance::Hold,
            };
        }

        if self.queue.is_empty() {
            self.clear_current();
            return Advance::Stop;
        }
        let next = self.current_index.map(|i| i + 1).unwrap_or(0);
        let next_id = if next < self.queue.len() {
            &self.queue[next]
        } else {
            &self.queue[0]
        };
        match library.get(next_id) {
            Some(track) => {
                self.select(track.clone());
                Advance::Play(track)
            }
            None => Advance::Hold,
        }
    }
}
