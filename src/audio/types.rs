//! Audio-related small types and handles.
//!
//! This module defines the commands accepted by the audio thread, the events
//! it reports back, the shared playback info and the playback error type.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::StatusCode;

#[derive(Debug)]
pub enum AudioCmd {
    /// Fetch the preview at `preview_url` and start playing it.
    Play { preview_url: String },
    /// Stop playback immediately.
    Stop,
    /// Toggle pause/resume.
    TogglePause,
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Reported by the audio thread after it handled a `Play` command or a
/// preview ran out.
#[derive(Debug)]
pub enum AudioEvent {
    Started { preview_url: String },
    Failed {
        preview_url: String,
        error: PlaybackError,
    },
    Finished { preview_url: String },
}

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("preview request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("preview request returned status {0}")]
    Status(StatusCode),
    #[error("could not decode preview: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}

impl PlaybackError {
    pub const TITLE: &'static str = "Playback Error";
    pub const MESSAGE: &'static str = "Could not play the audio preview.";
}

#[derive(Debug, Clone, Default)]
/// Runtime playback information shared with the UI.
pub struct PlaybackInfo {
    /// Preview currently loaded in the sink (if any).
    pub preview_url: Option<String>,
    /// Elapsed playback time for the current preview.
    pub elapsed: Duration,
    /// Total length reported by the decoder, when known.
    pub total: Option<Duration>,
    /// Whether playback is currently active.
    pub playing: bool,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
