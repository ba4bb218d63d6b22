use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::*;
use crate::library::tests::wav_bytes;
use crate::library::{Library, Track};

fn engine() -> (
    PlaybackEngine<Sender<AudioCmd>>,
    Receiver<AudioCmd>,
    PlaybackHandle,
) {
    let (tx, rx) = mpsc::channel();
    let playback: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));
    // open_external = false keeps tests from spawning a browser.
    let engine = PlaybackEngine::new(tx, playback.clone(), false);
    (engine, rx, playback)
}

fn library_with_one_of_each() -> (Library, Track, Track) {
    let mut lib = Library::default();
    let audio = lib.add_audio_track(wav_bytes(), "chime").unwrap();
    let video = lib.add_video_track("https://youtu.be/dQw4w9WgXcQ").unwrap();
    (lib, audio, video)
}

fn drain(rx: &Receiver<AudioCmd>) -> Vec<AudioCmd> {
    let mut cmds = Vec::new();
    while let Ok(cmd) = rx.try_recv() {
        cmds.push(cmd);
    }
    cmds
}

#[test]
fn playing_audio_blanks_the_embed_frame_first() {
    let (mut engine, rx, _) = engine();
    let (lib, audio, video) = library_with_one_of_each();

    engine.play(&video, &lib).unwrap();
    assert_eq!(engine.active(), Some(BackendKind::Video));
    assert!(engine.embed_src().is_some());

    engine.play(&audio, &lib).unwrap();
    assert_eq!(engine.active(), Some(BackendKind::Audio));
    assert!(engine.embed_src().is_none());

    let cmds = drain(&rx);
    // Video playback stopped the audio backend; switching back to audio
    // then issued exactly one Play.
    assert!(matches!(cmds[0], AudioCmd::Stop));
    match &cmds[1] {
        AudioCmd::Play { id, bytes, .. } => {
            assert_eq!(id.as_str(), audio.id());
            assert!(!bytes.is_empty());
        }
        other => panic!("expected Play, got {other:?}"),
    }
    assert_eq!(cmds.len(), 2);
}

#[test]
fn playing_video_stops_the_audio_backend_first() {
    let (mut engine, rx, _) = engine();
    let (lib, audio, video) = library_with_one_of_each();

    engine.play(&audio, &lib).unwrap();
    drain(&rx);

    engine.play(&video, &lib).unwrap();
    let cmds = drain(&rx);
    assert!(matches!(cmds.as_slice(), [AudioCmd::Stop]));
    assert_eq!(
        engine.embed_src(),
        Some("https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&controls=1")
    );
}

#[test]
fn pausing_a_video_blanks_the_frame() {
    let (mut engine, _rx, _) = engine();
    let (lib, _, video) = library_with_one_of_each();

    engine.play(&video, &lib).unwrap();
    engine.pause();
    assert_eq!(engine.active(), None);
    assert!(engine.embed_src().is_none());
}

#[test]
fn pause_and_resume_forward_to_the_audio_backend() {
    let (mut engine, rx, _) = engine();
    let (lib, audio, _) = library_with_one_of_each();

    engine.play(&audio, &lib).unwrap();
    drain(&rx);
    engine.pause();
    engine.resume();
    let cmds = drain(&rx);
    assert!(matches!(cmds.as_slice(), [AudioCmd::Pause, AudioCmd::Resume]));
}

#[test]
fn play_fails_for_a_track_with_unreadable_bytes() {
    let (mut engine, rx, _) = engine();
    let (mut lib, audio, _) = library_with_one_of_each();

    // Simulate corrupt storage by breaking the stored data URI.
    let id = audio.id().to_string();
    let mut tracks: Vec<_> = lib.audio_tracks().to_vec();
    tracks[0].data = "not a data uri".to_string();
    lib = Library::new(tracks, lib.video_tracks().to_vec());

    let track = lib.get(&id).unwrap();
    assert_eq!(
        engine.play(&track, &lib),
        Err(PlayerError::Unavailable("chime".to_string()))
    );
    assert!(drain(&rx).is_empty());
    assert_eq!(engine.active(), None);
}

#[test]
fn seek_needs_an_active_audio_track_with_a_known_duration() {
    let (mut engine, rx, playback) = engine();
    let (lib, audio, video) = library_with_one_of_each();

    // No active track: ignored.
    engine.seek_fraction(0.5);
    assert!(drain(&rx).is_empty());
    assert!(!engine.supports_seek());

    // Video: position and seek are unavailable.
    engine.play(&video, &lib).unwrap();
    engine.seek_fraction(0.5);
    assert!(engine.position().is_none());
    assert!(!engine.supports_seek());

    engine.play(&audio, &lib).unwrap();
    playback.lock().unwrap().duration = Some(Duration::from_secs(100));
    drain(&rx);
    engine.seek_fraction(0.25);
    let cmds = drain(&rx);
    match cmds.as_slice() {
        [AudioCmd::SeekTo(target)] => assert_eq!(*target, Duration::from_secs(25)),
        other => panic!("expected SeekTo, got {other:?}"),
    }
    assert!(engine.supports_seek());
}

#[test]
fn position_reflects_the_shared_playback_info() {
    let (mut engine, _rx, playback) = engine();
    let (lib, audio, _) = library_with_one_of_each();

    engine.play(&audio, &lib).unwrap();
    {
        let mut info = playback.lock().unwrap();
        info.elapsed = Duration::from_secs(7);
        info.duration = Some(Duration::from_secs(60));
    }
    assert_eq!(
        engine.position(),
        Some((Duration::from_secs(7), Some(Duration::from_secs(60))))
    );
}

#[test]
fn stop_tears_down_both_backends() {
    let (mut engine, rx, _) = engine();
    let (lib, _, video) = library_with_one_of_each();

    engine.play(&video, &lib).unwrap();
    drain(&rx);
    engine.stop();
    assert_eq!(engine.active(), None);
    assert!(engine.embed_src().is_none());
    assert!(matches!(drain(&rx).as_slice(), [AudioCmd::Stop]));
}

#[test]
fn embed_frame_replaces_and_blanks() {
    let mut frame = EmbedFrame::new(false);
    assert!(!frame.is_active());
    frame.load("https://www.youtube.com/embed/a?autoplay=1&controls=1".to_string());
    frame.load("https://www.youtube.com/embed/b?autoplay=1&controls=1".to_string());
    assert_eq!(
        frame.src(),
        Some("https://www.youtube.com/embed/b?autoplay=1&controls=1")
    );
    frame.stop();
    assert!(!frame.is_active());
}
