//! Application model: `App` and the modal prompt kinds.

use std::path::Path;

use crate::config::Settings;
use crate::controller::Controller;
use crate::library::{Category, Library, Track};
use crate::playlist::{PlaylistError, PlaylistStore};
use crate::queue::Filter;
use crate::session::{SessionError, SessionTimer, TimerPhase, WorkLog};
use crate::storage::Storage;

/// Modal text prompts the UI can be in. While a prompt is open, keys feed
/// `prompt_input` instead of the normal bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    WorkDescription,
    ImportAudioPath,
    AddVideoUrl,
    PlaylistName,
    CustomMinutes,
    ConfirmEarlyComplete,
    ConfirmDeletePlaylist(String),
}

/// The main application model.
pub struct App {
    pub library: Library,
    pub playlists: PlaylistStore,
    pub work_log: WorkLog,
    pub controller: Controller,
    pub timer: SessionTimer,
    storage: Storage,

    /// Description of the work this session is for.
    pub work_input: String,

    /// Cursor position within the visible queue.
    pub selected: usize,
    /// Track ids marked for the playlist being built.
    pub marked: Vec<String>,
    /// Id of the playlist being edited, when saving updates one in place.
    pub editing_playlist: Option<String>,

    pub prompt: Option<Prompt>,
    pub prompt_input: String,
    /// One-line status message shown until the next action replaces it.
    pub notice: Option<String>,

    pub max_custom_minutes: u32,
    pub timer_presets: Vec<u32>,
}

impl App {
    /// Build the model from persisted state.
    pub fn new(storage: Storage, settings: &Settings) -> Self {
        let library = Library::new(storage.load_audio_tracks(), storage.load_video_tracks());
        let playlists = PlaylistStore::new(storage.load_playlists());
        let work_log = storage.load_work_log();

        let mut controller = Controller::new(
            settings.playback.loop_track,
            settings.playback.shuffle,
            settings.playback.volume,
        );
        controller.refresh_queue(&library, &playlists);

        Self {
            library,
            playlists,
            work_log,
            controller,
            timer: SessionTimer::new(settings.timer.default_minutes),
            storage,
            work_input: String::new(),
            selected: 0,
            marked: Vec::new(),
            editing_playlist: None,
            prompt: None,
            prompt_input: String::new(),
            notice: None,
            max_custom_minutes: settings.timer.max_custom_minutes,
            timer_presets: settings.timer.presets.clone(),
        }
    }

    // ---- queue and selection ----

    /// Tracks of the visible queue, in queue order.
    pub fn visible_tracks(&self) -> Vec<Track> {
        self.controller
            .queue()
            .iter()
            .filter_map(|id| self.library.get(id))
            .collect()
    }

    pub fn selected_track(&self) -> Option<Track> {
        let id = self.controller.queue().get(self.selected)?;
        self.library.get(id)
    }

    pub fn select_next(&mut self) {
        let len = self.controller.queue().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.controller.queue().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.controller.queue().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Cycle the filter through all tracks, both categories, then each
    /// playlist, newest first.
    pub fn cycle_filter(&mut self) {
        let mut ring: Vec<Filter> = vec![
            Filter::All,
            Filter::Category(Category::Mp3),
            Filter::Category(Category::Youtube),
        ];
        ring.extend(
            self.playlists
                .all()
                .iter()
                .map(|p| Filter::Playlist(p.id.clone())),
        );

        let pos = ring.iter().position(|f| f == self.controller.filter());
        let next = ring[(pos.map(|p| p + 1).unwrap_or(0)) % ring.len()].clone();
        self.controller
            .set_filter(next, &self.library, &self.playlists);
        self.clamp_selection();
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.controller
            .set_filter(filter, &self.library, &self.playlists);
        self.clamp_selection();
    }

    // ---- library mutations ----

    /// Import an audio file from disk into the library.
    pub fn import_audio(&mut self, path: &str) {
        let path = Path::new(path.trim());
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.notice = Some(format!("could not read {}: {err}", path.display()));
                return;
            }
        };
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        match self.library.add_audio_track(bytes, &name) {
            Ok(track) => {
                self.notice = Some(format!("imported {}", track.name()));
                self.persist_audio();
                self.refresh();
            }
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    /// Link a video by URL and jump the filter to the youtube category so
    /// the new entry is on screen.
    pub fn add_video(&mut self, url: &str) {
        match self.library.add_video_track(url.trim()) {
            Ok(track) => {
                self.notice = Some(format!("added {}", track.name()));
                self.persist_video();
                self.set_filter(Filter::Category(Category::Youtube));
                self.selected = 0;
            }
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    /// Remove the track under the cursor from the library. Playlists keep
    /// their reference; queue resolution drops it.
    pub fn remove_selected(&mut self) {
        let Some(track) = self.selected_track() else {
            return;
        };
        match &track {
            Track::Audio(t) => {
                self.library.remove_audio_track(&t.id);
                self.persist_audio();
            }
            Track::Video(t) => {
                self.library.remove_video_track(&t.id);
                self.persist_video();
            }
        }
        self.marked.retain(|id| id != track.id());
        self.notice = Some(format!("removed {}", track.name()));
        self.refresh();
        self.clamp_selection();
    }

    // ---- playlists ----

    pub fn toggle_mark(&mut self) {
        let Some(track) = self.selected_track() else {
            return;
        };
        let id = track.id().to_string();
        if let Some(pos) = self.marked.iter().position(|m| m == &id) {
            self.marked.remove(pos);
        } else {
            self.marked.push(id);
        }
    }

    /// Create a playlist from the marked tracks, or overwrite the one being
    /// edited. Clears the marks on success.
    pub fn save_playlist(&mut self, name: &str) {
        let tracks = self.marked.clone();
        let editing = self.editing_playlist.take();
        let result = match &editing {
            Some(id) => self.playlists.update(id, name, tracks),
            None => self.playlists.create(name, tracks).map(|_| ()),
        };
        match result {
            Ok(()) => {
                let saved = match &editing {
                    Some(id) => self.playlists.get(id).map(|p| p.name.clone()),
                    None => self.playlists.all().first().map(|p| p.name.clone()),
                };
                self.notice = saved.map(|name| format!("saved playlist {name}"));
                self.marked.clear();
                self.persist_playlists();
                self.refresh();
            }
            Err(PlaylistError::EmptySelection) => {
                // Keep the editing state so marks can be fixed and retried.
                self.editing_playlist = editing;
                self.notice = Some("mark at least one track first".to_string());
            }
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    /// Load a playlist's tracks into the marks and remember its id so the
    /// next save updates it in place.
    pub fn edit_playlist(&mut self, id: &str) {
        if let Some(playlist) = self.playlists.get(id) {
            self.marked = playlist.tracks.clone();
            self.editing_playlist = Some(playlist.id.clone());
        }
    }

    pub fn delete_playlist(&mut self, id: &str) {
        if self.playlists.delete(id) {
            self.controller
                .playlist_deleted(id, &self.library, &self.playlists);
            if self.editing_playlist.as_deref() == Some(id) {
                self.editing_playlist = None;
            }
            self.notice = Some("playlist deleted".to_string());
            self.persist_playlists();
            self.clamp_selection();
        }
    }

    /// Switch the filter to a playlist and hand back its first resolved
    /// track, already selected as current. The caller starts playback.
    pub fn play_playlist(&mut self, id: &str) -> Option<Track> {
        self.playlists.get(id)?;
        self.set_filter(Filter::Playlist(id.to_string()));
        self.selected = 0;
        let track = self.selected_track()?;
        self.controller.select(track.clone());
        Some(track)
    }

    // ---- sessions ----

    pub fn start_timer(&mut self) -> Result<(), SessionError> {
        self.timer.start(!self.work_input.trim().is_empty())
    }

    pub fn configure_timer(&mut self, minutes: u32) {
        match self.timer.configure(minutes, 0) {
            Ok(()) => self.notice = Some(format!("timer set to {minutes} min")),
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    /// Ask to finish the running session early. The same description guard
    /// as starting applies, so an emptied work text cannot log a blank
    /// entry.
    pub fn confirm_early_completion(&mut self) {
        if self.timer.phase() == TimerPhase::Idle {
            return;
        }
        if self.work_input.trim().is_empty() {
            self.notice = Some(SessionError::MissingWorkDescription.to_string());
            return;
        }
        self.prompt = Some(Prompt::ConfirmEarlyComplete);
        self.prompt_input.clear();
    }

    /// Parse and apply a custom duration from the prompt input.
    pub fn configure_custom(&mut self, input: &str) {
        match input.trim().parse::<u32>() {
            Ok(minutes) if (1..=self.max_custom_minutes).contains(&minutes) => {
                self.configure_timer(minutes);
            }
            _ => {
                self.notice = Some(format!(
                    "enter a number of minutes between 1 and {}",
                    self.max_custom_minutes
                ));
            }
        }
    }

    /// Log a completed session and clear the work description, ready for
    /// the next one.
    pub fn finish_session(&mut self, minutes: u32) {
        self.log_session(minutes);
        self.work_input.clear();
    }

    /// Log a finished session against the current work description.
    pub fn log_session(&mut self, minutes: u32) {
        let track = self.controller.current().map(|t| t.name().to_string());
        let content = self.work_input.trim().to_string();
        log::debug!("logging session: {minutes} min on {content:?}");
        self.work_log.record(&content, minutes, track);
        self.notice = Some(format!("logged {minutes} min"));
        self.persist_work_log();
    }

    /// Flush an in-flight session before the process exits. Safe to call
    /// on every exit path; only the first call logs.
    pub fn flush_unfinished_session(&mut self) {
        if self.work_input.trim().is_empty() {
            return;
        }
        if let Some(minutes) = self.timer.abrupt_elapsed_minutes() {
            self.timer.mark_completed();
            self.log_session(minutes);
        }
    }

    // ---- persistence ----

    pub fn refresh(&mut self) {
        self.controller.refresh_queue(&self.library, &self.playlists);
    }

    fn persist_audio(&mut self) {
        if let Err(err) = self.storage.save_audio_tracks(self.library.audio_tracks()) {
            self.report_save_error("audio tracks", err);
        }
    }

    fn persist_video(&mut self) {
        if let Err(err) = self.storage.save_video_tracks(self.library.video_tracks()) {
            self.report_save_error("video tracks", err);
        }
    }

    fn persist_playlists(&mut self) {
        if let Err(err) = self.storage.save_playlists(self.playlists.all()) {
            self.report_save_error("playlists", err);
        }
    }

    pub fn persist_work_log(&mut self) {
        if let Err(err) = self.storage.save_work_log(&self.work_log) {
            self.report_save_error("work log", err);
        }
    }

    fn report_save_error(&mut self, what: &str, err: std::io::Error) {
        log::warn!("could not save {what}: {err}");
        self.notice = Some(format!("could not save {what}: {err}"));
    }
}
