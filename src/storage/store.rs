use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::library::{AudioTrack, VideoTrack};
use crate::playlist::Playlist;
use crate::session::WorkLog;

const WORK_LOG_FILE: &str = "work_log.json";
const PLAYLISTS_FILE: &str = "playlists.json";
const AUDIO_TRACKS_FILE: &str = "audio_tracks.json";
const VIDEO_TRACKS_FILE: &str = "video_tracks.json";

/// On-disk home for the four JSON documents.
///
/// Loads are tolerant: a missing or unreadable document falls back to its
/// default so one corrupt file never blocks startup. Saves go through a
/// temp file and rename, so a crash mid-write leaves the old document
/// intact.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Open the data directory, creating it if needed. `override_dir`
    /// takes precedence over the platform default.
    pub fn open(override_dir: Option<PathBuf>) -> io::Result<Self> {
        let dir = match override_dir {
            Some(dir) => dir,
            None => default_data_dir(),
        };
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn load_work_log(&self) -> WorkLog {
        self.load(WORK_LOG_FILE)
    }

    pub fn save_work_log(&self, log: &WorkLog) -> io::Result<()> {
        self.save(WORK_LOG_FILE, log)
    }

    pub fn load_playlists(&self) -> Vec<Playlist> {
        self.load(PLAYLISTS_FILE)
    }

    pub fn save_playlists(&self, playlists: &[Playlist]) -> io::Result<()> {
        self.save(PLAYLISTS_FILE, &playlists)
    }

    pub fn load_audio_tracks(&self) -> Vec<AudioTrack> {
        self.load(AUDIO_TRACKS_FILE)
    }

    pub fn save_audio_tracks(&self, tracks: &[AudioTrack]) -> io::Result<()> {
        self.save(AUDIO_TRACKS_FILE, &tracks)
    }

    pub fn load_video_tracks(&self) -> Vec<VideoTrack> {
        self.load(VIDEO_TRACKS_FILE)
    }

    pub fn save_video_tracks(&self, tracks: &[VideoTrack]) -> io::Result<()> {
        self.save(VIDEO_TRACKS_FILE, &tracks)
    }

    fn load<T: DeserializeOwned + Default>(&self, file: &str) -> T {
        let path = self.dir.join(file);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    log::warn!("could not read {}: {err}", path.display());
                }
                return T::default();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("ignoring malformed {}: {err}", path.display());
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, file: &str, value: &T) -> io::Result<()> {
        let json = serde_json::to_vec_pretty(value).map_err(io::Error::other)?;
        let path = self.dir.join(file);
        let tmp = self.dir.join(format!("{file}.tmp"));
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)
    }
}

fn default_data_dir() -> PathBuf {
    match dirs::data_dir() {
        Some(base) => base.join("andante"),
        None => PathBuf::from(".andante"),
    }
}
