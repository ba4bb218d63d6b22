//! Audio-related small types and handles.
//!
//! This module defines the command and event types exchanged with the
//! audio thread, plus the shared playback info handle the UI reads.

use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
pub enum AudioCmd {
    /// Start playing the given track from its decoded bytes.
    Play {
        id: String,
        bytes: Vec<u8>,
        duration: Option<Duration>,
    },
    /// Pause the current sink, keeping position.
    Pause,
    /// Resume a paused sink.
    Resume,
    /// Stop playback and clear the current track.
    Stop,
    /// Set the volume applied to the current and future sinks (0.0 to 1.0).
    SetVolume(f32),
    /// Seek to an absolute position within the current track.
    SeekTo(Duration),
    /// Quit the audio thread.
    Quit,
}

/// Notifications the audio thread sends back to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The current track played to its end.
    Ended { id: String },
    /// The track could not be decoded or started.
    Unavailable { id: String, reason: String },
}

#[derive(Debug, Clone)]
/// Runtime playback information shared with the UI.
pub struct PlaybackInfo {
    /// Id of the track loaded in the audio backend (if any).
    pub id: Option<String>,
    /// Elapsed playback time for the current track.
    pub elapsed: Duration,
    /// Total duration, when the decoder could report one.
    pub duration: Option<Duration>,
    /// Whether playback is currently active.
    pub playing: bool,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            id: None,
            elapsed: Duration::ZERO,
            duration: None,
            playing: false,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

/// Seam between the engine and the audio thread. Implemented by the real
/// player and by a bare channel sender, which is what tests talk to.
pub trait AudioControl {
    fn send_cmd(&self, cmd: AudioCmd);
}

impl AudioControl for std::sync::mpsc::Sender<AudioCmd> {
    fn send_cmd(&self, cmd: AudioCmd) {
        let _ = self.send(cmd);
    }
}
