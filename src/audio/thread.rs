use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::config::AudioSettings;

use super::fetch::PreviewFetcher;
use super::sink::create_sink;
use super::types::{AudioCmd, AudioEvent, PlaybackError, PlaybackHandle};

/// Spawn the audio thread. `ready` receives `Ok(())` once the output device
/// is open, or the reason it could not be opened.
pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<AudioEvent>,
    playback_info: PlaybackHandle,
    audio_settings: AudioSettings,
    fetcher: PreviewFetcher,
    ready: Sender<Result<(), String>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                let _ = ready.send(Err(e.to_string()));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));

        let mut deck = Deck::new(&stream, playback_info, events, audio_settings);
        let mut backlog: VecDeque<AudioCmd> = VecDeque::new();

        loop {
            let cmd = match backlog.pop_front() {
                Some(cmd) => cmd,
                None => match rx.recv_timeout(Duration::from_millis(200)) {
                    Ok(cmd) => cmd,
                    Err(RecvTimeoutError::Timeout) => {
                        deck.tick();
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                },
            };

            backlog.push_front(cmd);
            backlog.extend(rx.try_iter());
            let skipped = skip_superseded(&mut backlog);
            if skipped > 0 {
                log::debug!("skipped {skipped} superseded audio command(s)");
            }
            let Some(cmd) = backlog.pop_front() else {
                continue;
            };

            match cmd {
                AudioCmd::Play { preview_url } => {
                    let fetched = fetcher.fetch(&preview_url);
                    // Anything that arrived during the download may already
                    // replace this preview.
                    backlog.extend(rx.try_iter());
                    if supersedes_play(&backlog) {
                        log::debug!("dropping superseded preview {preview_url}");
                        continue;
                    }
                    deck.play(preview_url, fetched);
                }
                AudioCmd::Stop => deck.stop(),
                AudioCmd::TogglePause => deck.toggle_pause(),
                AudioCmd::Quit { fade_out_ms } => {
                    deck.quit(fade_out_ms);
                    break;
                }
            }
        }
        log::debug!("audio thread exiting");
    })
}

/// Drop queued commands that a later command makes pointless. A `Quit`
/// discards everything before it. Otherwise the last `Play` discards
/// everything before it, since playing a new preview replaces whatever
/// stop or pause came first. Returns how many commands were dropped.
pub(super) fn skip_superseded(backlog: &mut VecDeque<AudioCmd>) -> usize {
    let cut = backlog
        .iter()
        .position(|c| matches!(c, AudioCmd::Quit { .. }))
        .or_else(|| {
            backlog
                .iter()
                .rposition(|c| matches!(c, AudioCmd::Play { .. }))
        })
        .unwrap_or(0);
    backlog.drain(..cut);
    cut
}

/// Whether a queued command makes a preview that just finished downloading
/// obsolete.
pub(super) fn supersedes_play(backlog: &VecDeque<AudioCmd>) -> bool {
    backlog
        .iter()
        .any(|c| matches!(c, AudioCmd::Play { .. } | AudioCmd::Quit { .. }))
}

/// Everything the audio thread tracks about the preview it is playing.
struct Deck<'a> {
    stream: &'a OutputStream,
    sink: Option<Sink>,
    current: Option<String>,
    paused: bool,
    // Start of the current play span and time accumulated before it.
    started_at: Option<Instant>,
    accumulated: Duration,
    info: PlaybackHandle,
    events: Sender<AudioEvent>,
    settings: AudioSettings,
}

impl<'a> Deck<'a> {
    fn new(
        stream: &'a OutputStream,
        info: PlaybackHandle,
        events: Sender<AudioEvent>,
        settings: AudioSettings,
    ) -> Self {
        Self {
            stream,
            sink: None,
            current: None,
            paused: true,
            started_at: None,
            accumulated: Duration::ZERO,
            info,
            events,
            settings,
        }
    }

    fn play(&mut self, preview_url: String, fetched: Result<Vec<u8>, PlaybackError>) {
        let prepared =
            fetched.and_then(|bytes| create_sink(self.stream, bytes, self.settings.volume));

        let (new_sink, total) = match prepared {
            Ok(prepared) => prepared,
            Err(error) => {
                log::error!("Audio play failed for {preview_url}: {error}");
                // Loading a new source abandons whatever was playing.
                self.stop();
                let _ = self.events.send(AudioEvent::Failed { preview_url, error });
                return;
            }
        };

        self.crossfade_into(&new_sink);

        new_sink.play();
        self.sink = Some(new_sink);
        self.current = Some(preview_url.clone());
        self.paused = false;
        self.started_at = Some(Instant::now());
        self.accumulated = Duration::ZERO;

        if let Ok(mut info) = self.info.lock() {
            info.preview_url = Some(preview_url.clone());
            info.elapsed = Duration::ZERO;
            info.total = total;
            info.playing = true;
        }
        log::info!("playing preview {preview_url}");
        let _ = self.events.send(AudioEvent::Started { preview_url });
    }

    /// Fade the current sink out while `new_sink` fades in, then drop the old one.
    fn crossfade_into(&mut self, new_sink: &Sink) {
        let Some(old_sink) = self.sink.take() else {
            return;
        };

        let crossfade_ms = self.settings.crossfade_ms;
        let crossfade_steps = self.settings.crossfade_steps.max(1);
        let volume = self.settings.volume;

        if self.paused || crossfade_ms == 0 {
            old_sink.stop();
            return;
        }

        new_sink.set_volume(0.0);
        new_sink.play();

        // Fade volumes in a short blocking loop. This is simple and good enough
        // for a TUI player; audio continues in rodio's mixer thread.
        for step in 1..=crossfade_steps {
            let t = (step as f32) / (crossfade_steps as f32);
            old_sink.set_volume(volume * (1.0 - t));
            new_sink.set_volume(volume * t);
            thread::sleep(Duration::from_millis((crossfade_ms / crossfade_steps).max(1)));
        }

        old_sink.stop();
        new_sink.set_volume(volume);
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.current = None;
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        if let Ok(mut info) = self.info.lock() {
            *info = Default::default();
        }
    }

    fn toggle_pause(&mut self) {
        let Some(ref s) = self.sink else {
            return;
        };

        if self.paused {
            s.play();
            self.started_at = Some(Instant::now());
        } else {
            s.pause();
            if let Some(st) = self.started_at.take() {
                self.accumulated += st.elapsed();
            }
        }
        self.paused = !self.paused;

        if let Ok(mut info) = self.info.lock() {
            info.playing = !self.paused;
        }
    }

    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    /// Periodic housekeeping: publish elapsed time and notice finished previews.
    fn tick(&mut self) {
        let Some(ref s) = self.sink else {
            return;
        };
        if self.paused {
            return;
        }

        if s.empty() {
            if let Some(preview_url) = self.current.clone() {
                log::debug!("preview finished: {preview_url}");
                self.stop();
                let _ = self.events.send(AudioEvent::Finished { preview_url });
            }
            return;
        }

        let elapsed = self.elapsed();
        if let Ok(mut info) = self.info.lock() {
            info.elapsed = elapsed;
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(ref s) = self.sink {
            if !self.paused {
                fade_out_sink(s, self.settings.volume, fade_out_ms);
            }
            s.stop();
        }
        // Update shared state so UI/MPRIS don't keep showing Playing.
        if let Ok(mut info) = self.info.lock() {
            info.playing = false;
        }
    }
}

fn fade_out_sink(sink: &Sink, volume: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(volume * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
