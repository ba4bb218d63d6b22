//! Utilities for creating `rodio` sinks from in-memory track bytes.
//!
//! The helper here encapsulates decoding a byte buffer and preparing a
//! paused `Sink` at the requested start position.

use std::io::Cursor;
use std::time::Duration;

use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, Sink, Source};

/// Create a paused `Sink` playing `bytes` from `start_at`.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    bytes: Vec<u8>,
    start_at: Duration,
) -> Result<Sink, DecoderError> {
    let source = Decoder::new(Cursor::new(bytes))?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
