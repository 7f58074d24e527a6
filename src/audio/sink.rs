//! Utilities for creating `rodio` sinks from downloaded previews.
//!
//! The helpers here encapsulate decoding an in-memory clip and preparing a
//! paused `Sink` for it.

use std::io::Cursor;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::PlaybackError;

/// Decode a downloaded preview.
pub(super) fn decode_preview(bytes: Vec<u8>) -> Result<Decoder<Cursor<Vec<u8>>>, PlaybackError> {
    Ok(Decoder::new(Cursor::new(bytes))?)
}

/// Create a paused `Sink` playing `bytes`, along with the clip length when
/// the decoder knows it.
pub(super) fn create_sink(
    handle: &OutputStream,
    bytes: Vec<u8>,
    volume: f32,
) -> Result<(Sink, Option<Duration>), PlaybackError> {
    let source = decode_preview(bytes)?;
    let total = source.total_duration();

    let sink = Sink::connect_new(handle.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    Ok((sink, total))
}
