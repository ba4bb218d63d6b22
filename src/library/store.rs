use std::io::Cursor;

use log::debug;
use rodio::{Decoder, Source};
use thiserror::Error;
use uuid::Uuid;

use super::model::{
    AUDIO_TRACK_LIMIT, AudioTrack, MAX_AUDIO_BYTES, Track, VIDEO_TRACK_LIMIT, VideoTrack,
    decode_data_uri, encode_data_uri,
};
use super::video::extract_video_id;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LibraryError {
    #[error("track limit reached ({0} max)")]
    CapacityExceeded(usize),
    #[error("file is larger than 10 MiB")]
    TooLarge,
    #[error("file is not decodable audio")]
    InvalidFormat,
    #[error("no video id could be extracted from that URL")]
    InvalidUrl,
}

/// The unified track collection: uploaded audio tracks plus linked video
/// tracks, addressed by stable ids that are never reused.
#[derive(Debug, Default, Clone)]
pub struct Library {
    audio: Vec<AudioTrack>,
    video: Vec<VideoTrack>,
}

impl Library {
    pub fn new(audio: Vec<AudioTrack>, video: Vec<VideoTrack>) -> Self {
        Self { audio, video }
    }

    pub fn audio_tracks(&self) -> &[AudioTrack] {
        &self.audio
    }

    pub fn video_tracks(&self) -> &[VideoTrack] {
        &self.video
    }

    /// Every track, audio first then video, each set in insertion order.
    pub fn list_all(&self) -> Vec<Track> {
        self.audio
            .iter()
            .cloned()
            .map(Track::Audio)
            .chain(self.video.iter().cloned().map(Track::Video))
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<Track> {
        if let Some(t) = self.audio.iter().find(|t| t.id == id) {
            return Some(Track::Audio(t.clone()));
        }
        self.video
            .iter()
            .find(|t| t.id == id)
            .map(|t| Track::Video(t.clone()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.audio.iter().any(|t| t.id == id) || self.video.iter().any(|t| t.id == id)
    }

    /// Import an uploaded audio file. The bytes must decode with the same
    /// decoder the player uses; the reported duration (when any) is kept on
    /// the track so the UI can offer seeking.
    pub fn add_audio_track(&mut self, bytes: Vec<u8>, name: &str) -> Result<Track, LibraryError> {
        if self.audio.len() >= AUDIO_TRACK_LIMIT {
            return Err(LibraryError::CapacityExceeded(AUDIO_TRACK_LIMIT));
        }
        if bytes.len() > MAX_AUDIO_BYTES {
            return Err(LibraryError::TooLarge);
        }

        let duration = match Decoder::new(Cursor::new(bytes.clone())) {
            Ok(source) => source.total_duration(),
            Err(_) => return Err(LibraryError::InvalidFormat),
        };

        let name = name.trim();
        let track = AudioTrack {
            id: Uuid::new_v4().to_string(),
            name: if name.is_empty() { "Untitled" } else { name }.to_string(),
            data: encode_data_uri(&bytes),
            duration,
        };
        debug!("imported audio track {} ({} bytes)", track.name, bytes.len());
        self.audio.push(track.clone());
        Ok(Track::Audio(track))
    }

    /// Link an external video by URL. The display name is derived from the
    /// extracted id; new links go to the front of the list.
    pub fn add_video_track(&mut self, url: &str) -> Result<Track, LibraryError> {
        let video_id = extract_video_id(url).ok_or(LibraryError::InvalidUrl)?;
        if self.video.len() >= VIDEO_TRACK_LIMIT {
            return Err(LibraryError::CapacityExceeded(VIDEO_TRACK_LIMIT));
        }

        let track = VideoTrack {
            id: Uuid::new_v4().to_string(),
            name: format!("YouTube {video_id}"),
            url: url.to_string(),
            video_id,
        };
        self.video.insert(0, track.clone());
        Ok(Track::Video(track))
    }

    /// Idempotent: removing an unknown id is a no-op.
    pub fn remove_audio_track(&mut self, id: &str) {
        self.audio.retain(|t| t.id != id);
    }

    /// Idempotent: removing an unknown id is a no-op.
    pub fn remove_video_track(&mut self, id: &str) {
        self.video.retain(|t| t.id != id);
    }

    /// The raw bytes for an audio track, decoded from its data URI.
    pub fn audio_bytes(&self, id: &str) -> Option<Vec<u8>> {
        self.audio
            .iter()
            .find(|t| t.id == id)
            .and_then(|t| decode_data_uri(&t.data))
    }
}
