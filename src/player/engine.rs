use std::time::Duration;

use thiserror::Error;

use crate::library::{Library, Track, embed_url};

use super::embed::EmbedFrame;
use super::player::AudioPlayer;
use super::types::{AudioCmd, AudioControl, PlaybackHandle};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayerError {
    #[error("track is unavailable: {0}")]
    Unavailable(String),
}

/// Which backend currently owns playback.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BackendKind {
    Audio,
    Video,
}

/// Routes playback between the audio thread and the embed frame, keeping
/// at most one backend active. Switching backends tears the other one down
/// before the new track starts.
pub struct PlaybackEngine<A: AudioControl = AudioPlayer> {
    audio: A,
    embed: EmbedFrame,
    active: Option<BackendKind>,
    playback: PlaybackHandle,
}

impl<A: AudioControl> PlaybackEngine<A> {
    pub fn new(audio: A, playback: PlaybackHandle, open_external: bool) -> Self {
        Self {
            audio,
            embed: EmbedFrame::new(open_external),
            active: None,
            playback,
        }
    }

    /// Start `track`, tearing down whichever backend held the previous one.
    pub fn play(&mut self, track: &Track, library: &Library) -> Result<(), PlayerError> {
        match track {
            Track::Video(video) => {
                self.audio.send_cmd(AudioCmd::Stop);
                self.embed.load(embed_url(&video.video_id));
                self.active = Some(BackendKind::Video);
                Ok(())
            }
            Track::Audio(audio) => {
                self.embed.stop();
                let bytes = library
                    .audio_bytes(&audio.id)
                    .ok_or_else(|| PlayerError::Unavailable(audio.name.clone()))?;
                self.audio.send_cmd(AudioCmd::Play {
                    id: audio.id.clone(),
                    bytes,
                    duration: audio.duration,
                });
                self.active = Some(BackendKind::Audio);
                Ok(())
            }
        }
    }

    /// Pause the active backend. Video has no pause, so pausing a video
    /// blanks the frame entirely.
    pub fn pause(&mut self) {
        match self.active {
            Some(BackendKind::Audio) => self.audio.send_cmd(AudioCmd::Pause),
            Some(BackendKind::Video) => {
                self.embed.stop();
                self.active = None;
            }
            None => {}
        }
    }

    pub fn resume(&mut self) {
        if self.active == Some(BackendKind::Audio) {
            self.audio.send_cmd(AudioCmd::Resume);
        }
    }

    pub fn stop(&mut self) {
        self.audio.send_cmd(AudioCmd::Stop);
        self.embed.stop();
        self.active = None;
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.audio.send_cmd(AudioCmd::SetVolume(volume.clamp(0.0, 1.0)));
    }

    /// Seek to a fraction of the current track. Audio only, and only when
    /// the track's duration is known.
    pub fn seek_fraction(&mut self, fraction: f32) {
        if self.active != Some(BackendKind::Audio) {
            return;
        }
        let duration = match self.playback.lock() {
            Ok(info) => info.duration,
            Err(_) => None,
        };
        if let Some(total) = duration {
            let target = total.mul_f32(fraction.clamp(0.0, 1.0));
            self.audio.send_cmd(AudioCmd::SeekTo(target));
        }
    }

    /// Elapsed and total time for the active audio track. Video playback
    /// reports no position.
    pub fn position(&self) -> Option<(Duration, Option<Duration>)> {
        if self.active != Some(BackendKind::Audio) {
            return None;
        }
        match self.playback.lock() {
            Ok(info) => Some((info.elapsed, info.duration)),
            Err(_) => None,
        }
    }

    pub fn active(&self) -> Option<BackendKind> {
        self.active
    }

    pub fn supports_seek(&self) -> bool {
        self.active == Some(BackendKind::Audio)
            && self
                .playback
                .lock()
                .map(|info| info.duration.is_some())
                .unwrap_or(false)
    }

    pub fn embed_src(&self) -> Option<&str> {
        self.embed.src()
    }

    /// Forget the active backend after the audio thread reported the end of
    /// its track.
    pub fn track_ended(&mut self) {
        if self.active == Some(BackendKind::Audio) {
            self.active = None;
        }
    }
}
