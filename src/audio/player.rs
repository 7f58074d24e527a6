use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;
use crate::error::InitError;

use super::fetch::PreviewFetcher;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioEvent, PlaybackHandle, PlaybackInfo};

/// The command side of a preview player, as used by the event loop.
pub trait AudioControl {
    fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>>;

    /// Ask the player to fade out and stop, waiting until it has.
    fn quit_softly(&self, fade_out: Duration);
}

/// A bare command channel. Nothing is waited for on quit.
impl AudioControl for Sender<AudioCmd> {
    fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        Sender::send(self, cmd)
    }

    fn quit_softly(&self, fade_out: Duration) {
        let _ = Sender::send(
            self,
            AudioCmd::Quit {
                fade_out_ms: fade_out.as_millis() as u64,
            },
        );
    }
}

pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Start the audio thread and wait until it has opened the default
    /// output device. Failures are reported on `events` as `AudioEvent`s.
    pub fn new(
        audio_settings: AudioSettings,
        user_agent: &str,
        events: Sender<AudioEvent>,
    ) -> Result<Self, InitError> {
        let fetcher =
            PreviewFetcher::new(user_agent).map_err(|e| InitError::Client(e.to_string()))?;

        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(
            rx,
            events,
            playback_info.clone(),
            audio_settings,
            fetcher,
            ready_tx,
        );

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(reason)) => return Err(InitError::AudioOutput(reason)),
            Err(_) => return Err(InitError::AudioOutput("audio thread exited".to_string())),
        }

        Ok(Self {
            tx,
            playback: playback_info,
            join: Mutex::new(Some(audio_handle)),
        })
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }
}

impl AudioControl for AudioPlayer {
    fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
