use super::*;

/// A minimal valid PCM WAV file (16-bit mono, 8 kHz, 8 samples of silence),
/// so import tests need no fixture files and no audio device.
pub(crate) fn wav_bytes() -> Vec<u8> {
    let data = [0u8; 16];
    let mut out = Vec::new();
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data.len() as u32).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&8000u32.to_le_bytes()); // sample rate
    out.extend_from_slice(&16000u32.to_le_bytes()); // byte rate
    out.extend_from_slice(&2u16.to_le_bytes()); // block align
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    out.extend_from_slice(b"data");
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(&data);
    out
}

#[test]
fn extract_video_id_handles_known_url_shapes() {
    assert_eq!(
        extract_video_id("https://youtu.be/abc123").as_deref(),
        Some("abc123")
    );
    assert_eq!(
        extract_video_id("https://www.youtube.com/watch?v=abc123").as_deref(),
        Some("abc123")
    );
    assert_eq!(
        extract_video_id("https://www.youtube.com/embed/abc123").as_deref(),
        Some("abc123")
    );
}

#[test]
fn extract_video_id_strips_query_and_fragment() {
    assert_eq!(
        extract_video_id("https://www.youtube.com/watch?v=abc123&t=42s").as_deref(),
        Some("abc123")
    );
    assert_eq!(
        extract_video_id("https://youtu.be/abc123#start").as_deref(),
        Some("abc123")
    );
}

#[test]
fn extract_video_id_rejects_non_urls() {
    assert_eq!(extract_video_id("not a url"), None);
    assert_eq!(extract_video_id(""), None);
    assert_eq!(extract_video_id("https://example.com/watch?v=abc"), None);
}

#[test]
fn data_uri_round_trips() {
    let bytes = wav_bytes();
    let uri = encode_data_uri(&bytes);
    assert!(uri.starts_with("data:audio/mpeg;base64,"));
    assert_eq!(decode_data_uri(&uri).unwrap(), bytes);
    assert_eq!(decode_data_uri("garbage"), None);
}

#[test]
fn add_audio_track_assigns_fresh_ids_and_keeps_order() {
    let mut lib = Library::default();
    let a = lib.add_audio_track(wav_bytes(), "first").unwrap();
    let b = lib.add_audio_track(wav_bytes(), "second").unwrap();
    assert_ne!(a.id(), b.id());

    let all = lib.list_all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name(), "first");
    assert_eq!(all[1].name(), "second");
    assert!(all.iter().all(|t| t.category() == Category::Mp3));
}

#[test]
fn add_audio_track_rejects_undecodable_bytes() {
    let mut lib = Library::default();
    assert_eq!(
        lib.add_audio_track(b"definitely not audio".to_vec(), "bad"),
        Err(LibraryError::InvalidFormat)
    );
    assert!(lib.list_all().is_empty());
}

#[test]
fn add_audio_track_rejects_oversized_files() {
    let mut lib = Library::default();
    let huge = vec![0u8; MAX_AUDIO_BYTES + 1];
    assert_eq!(
        lib.add_audio_track(huge, "huge"),
        Err(LibraryError::TooLarge)
    );
}

#[test]
fn sixth_audio_track_hits_the_capacity_limit() {
    let mut lib = Library::default();
    for i in 0..AUDIO_TRACK_LIMIT {
        lib.add_audio_track(wav_bytes(), &format!("t{i}")).unwrap();
    }
    assert_eq!(
        lib.add_audio_track(wav_bytes(), "one too many"),
        Err(LibraryError::CapacityExceeded(AUDIO_TRACK_LIMIT))
    );
    assert_eq!(lib.audio_tracks().len(), AUDIO_TRACK_LIMIT);
}

#[test]
fn add_video_track_derives_name_and_prepends() {
    let mut lib = Library::default();
    lib.add_video_track("https://youtu.be/first1").unwrap();
    let t = lib.add_video_track("https://youtu.be/second2").unwrap();
    assert_eq!(t.name(), "YouTube second2");
    assert_eq!(t.category(), Category::Youtube);

    // Newest link first.
    assert_eq!(lib.video_tracks()[0].video_id, "second2");
    assert_eq!(lib.video_tracks()[1].video_id, "first1");
}

#[test]
fn add_video_track_rejects_bad_urls_and_enforces_limit() {
    let mut lib = Library::default();
    assert_eq!(
        lib.add_video_track("not a url"),
        Err(LibraryError::InvalidUrl)
    );

    for i in 0..VIDEO_TRACK_LIMIT {
        lib.add_video_track(&format!("https://youtu.be/vid{i}"))
            .unwrap();
    }
    assert_eq!(
        lib.add_video_track("https://youtu.be/overflow"),
        Err(LibraryError::CapacityExceeded(VIDEO_TRACK_LIMIT))
    );
    assert_eq!(lib.video_tracks().len(), VIDEO_TRACK_LIMIT);
}

#[test]
fn remove_is_idempotent() {
    let mut lib = Library::default();
    let t = lib.add_audio_track(wav_bytes(), "gone soon").unwrap();
    lib.remove_audio_track(t.id());
    lib.remove_audio_track(t.id());
    assert!(lib.list_all().is_empty());
    lib.remove_video_track("never existed");
}

#[test]
fn audio_bytes_round_trip_through_the_store() {
    let mut lib = Library::default();
    let t = lib.add_audio_track(wav_bytes(), "w").unwrap();
    assert_eq!(lib.audio_bytes(t.id()).unwrap(), wav_bytes());
    assert_eq!(lib.audio_bytes("missing"), None);
}
