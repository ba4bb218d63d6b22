use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

/// At most this many uploaded audio tracks.
pub const AUDIO_TRACK_LIMIT: usize = 5;
/// At most this many linked video tracks.
pub const VIDEO_TRACK_LIMIT: usize = 20;
/// Uploaded audio files above this size are rejected.
pub const MAX_AUDIO_BYTES: usize = 10 * 1024 * 1024;

/// Coarse filter dimension: every track belongs to exactly one category,
/// fixed by its source kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Category {
    Mp3,
    Youtube,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Mp3 => "mp3",
            Category::Youtube => "youtube",
        }
    }
}

/// An uploaded audio track. The file bytes are carried inside the record as
/// a base64 `data:` URI so the whole library round-trips through storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioTrack {
    pub id: String,
    pub name: String,
    pub data: String,
    /// Probed at import time; `None` when the container does not report one
    /// (seeking is disabled for such tracks).
    pub duration: Option<Duration>,
}

/// A linked external video. Only the extracted `video_id` is ever handed to
/// the embed backend; the original `url` is kept for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoTrack {
    pub id: String,
    pub name: String,
    pub url: String,
    pub video_id: String,
}

/// A playable unit from either source, as handed out by the library.
#[derive(Debug, Clone, PartialEq)]
pub enum Track {
    Audio(AudioTrack),
    Video(VideoTrack),
}

impl Track {
    pub fn id(&self) -> &str {
        match self {
            Track::Audio(t) => &t.id,
            Track::Video(t) => &t.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Track::Audio(t) => &t.name,
            Track::Video(t) => &t.name,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Track::Audio(_) => Category::Mp3,
            Track::Video(_) => Category::Youtube,
        }
    }
}

/// Wrap raw audio bytes into a `data:` URI.
pub fn encode_data_uri(bytes: &[u8]) -> String {
    format!("data:audio/mpeg;base64,{}", BASE64.encode(bytes))
}

/// Recover the raw bytes from a `data:` URI. Returns `None` for anything
/// that is not a base64 data URI (corrupt storage degrades to "no bytes").
pub fn decode_data_uri(uri: &str) -> Option<Vec<u8>> {
    let (_, payload) = uri.split_once("base64,")?;
    BASE64.decode(payload).ok()
}
