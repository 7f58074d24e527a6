//! Preview playback.
//!
//! A dedicated thread owns the rodio output stream. The UI talks to it with
//! `AudioCmd`s, reads progress through a shared `PlaybackHandle`, and learns
//! about started, failed and finished previews from `AudioEvent`s.

mod fetch;
mod player;
mod sink;
mod thread;
mod types;

pub use player::{AudioControl, AudioPlayer};
pub use types::{AudioCmd, AudioEvent, PlaybackError, PlaybackHandle, PlaybackInfo};
