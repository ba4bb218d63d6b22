use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioControl, PlaybackHandle, PlaybackInfo, PlayerEvent};

/// Owner of the audio thread. Commands go in through `send`, completions
/// come back on the event receiver returned by `spawn`.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn spawn() -> (Self, Receiver<PlayerEvent>) {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(rx, playback_info.clone(), event_tx);

        (
            Self {
                tx,
                playback: playback_info,
                join: Mutex::new(Some(audio_handle)),
            },
            event_rx,
        )
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    /// Stop the audio thread and wait for it to finish.
    pub fn quit(&self) {
        let _ = self.send(AudioCmd::Quit);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl AudioControl for AudioPlayer {
    fn send_cmd(&self, cmd: AudioCmd) {
        let _ = self.send(cmd);
    }
}

impl AudioControl for &AudioPlayer {
    fn send_cmd(&self, cmd: AudioCmd) {
        let _ = self.send(cmd);
    }
}
