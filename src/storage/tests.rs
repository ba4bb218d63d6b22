use std::fs;

use tempfile::TempDir;

use super::*;
use crate::library::tests::wav_bytes;
use crate::library::Library;
use crate::playlist::PlaylistStore;
use crate::session::WorkLog;

fn open_in(dir: &TempDir) -> Storage {
    Storage::open(Some(dir.path().join("data"))).unwrap()
}

#[test]
fn open_creates_the_data_directory() {
    let dir = TempDir::new().unwrap();
    let storage = open_in(&dir);
    assert!(storage.dir().is_dir());
}

#[test]
fn missing_documents_load_as_defaults() {
    let dir = TempDir::new().unwrap();
    let storage = open_in(&dir);
    assert!(storage.load_work_log().entries.is_empty());
    assert!(storage.load_playlists().is_empty());
    assert!(storage.load_audio_tracks().is_empty());
    assert!(storage.load_video_tracks().is_empty());
}

#[test]
fn documents_round_trip() {
    let dir = TempDir::new().unwrap();
    let storage = open_in(&dir);

    let mut log = WorkLog::default();
    log.record("deep work", 25, Some("lofi".to_string()));
    storage.save_work_log(&log).unwrap();

    let mut library = Library::default();
    library.add_audio_track(wav_bytes(), "chime").unwrap();
    library
        .add_video_track("https://youtu.be/dQw4w9WgXcQ")
        .unwrap();
    storage.save_audio_tracks(library.audio_tracks()).unwrap();
    storage.save_video_tracks(library.video_tracks()).unwrap();

    let mut playlists = PlaylistStore::default();
    let track_id = library.audio_tracks()[0].id.clone();
    playlists.create("focus", vec![track_id.clone()]).unwrap();
    storage.save_playlists(playlists.all()).unwrap();

    let log = storage.load_work_log();
    assert_eq!(log.entries.len(), 1);
    assert_eq!(log.entries[0].content, "deep work");

    let audio = storage.load_audio_tracks();
    assert_eq!(audio.len(), 1);
    assert_eq!(audio[0].name, "chime");

    let video = storage.load_video_tracks();
    assert_eq!(video.len(), 1);
    assert_eq!(video[0].video_id, "dQw4w9WgXcQ");

    let playlists = storage.load_playlists();
    assert_eq!(playlists.len(), 1);
    assert_eq!(playlists[0].tracks, vec![track_id]);
}

#[test]
fn corrupt_documents_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let storage = open_in(&dir);
    fs::write(storage.dir().join("work_log.json"), b"{ not json").unwrap();
    assert!(storage.load_work_log().entries.is_empty());
}

#[test]
fn save_replaces_the_previous_document() {
    let dir = TempDir::new().unwrap();
    let storage = open_in(&dir);

    let mut log = WorkLog::default();
    log.record("first", 10, None);
    storage.save_work_log(&log).unwrap();
    log.record("second", 5, None);
    storage.save_work_log(&log).unwrap();

    let log = storage.load_work_log();
    assert_eq!(log.entries.len(), 2);
    assert_eq!(log.entries[0].content, "second");
    assert!(!storage.dir().join("work_log.json.tmp").exists());
}
