//! Video-link helpers: extracting an embeddable id from the URL shapes we
//! recognize, and building the autoplay embed URL from it.

use std::sync::OnceLock;

use regex::Regex;

static VIDEO_ID_RE: OnceLock<Regex> = OnceLock::new();

/// Extract the embeddable video id from a URL.
///
/// Recognized shapes: `…youtube.com/watch?v=ID`, `…youtube.com/embed/ID`
/// and the short link `…youtu.be/ID`. Pure; returns `None` when no id can
/// be extracted.
pub fn extract_video_id(url: &str) -> Option<String> {
    let re = VIDEO_ID_RE.get_or_init(|| {
        Regex::new(r"(?:youtube\.com/(?:watch\?v=|embed/)|youtu\.be/)([^&\n?#]+)")
            .expect("video id pattern")
    });
    re.captures(url).map(|caps| caps[1].to_string())
}

/// The embed URL handed to the video surface for load-and-autoplay.
pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}?autoplay=1&controls=1")
}
