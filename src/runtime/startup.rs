use std::io;
use std::sync::mpsc::Sender;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::audio::{AudioControl, AudioEvent, AudioPlayer, PlaybackHandle};
use crate::config;
use crate::error::InitError;
use crate::search::{HttpSearch, SearchOutcome, SearchWorker};
use crate::ui::{self, Mounts};

/// Long-lived workers started once every startup check passed.
pub struct Services {
    pub audio: Box<dyn AudioControl>,
    pub playback: PlaybackHandle,
    pub search: SearchWorker,
}

/// Every mount point must get room on a terminal of `area`, with the
/// now-playing bar counted as revealed.
pub fn check_mounts(area: Rect, ui_settings: &config::UiSettings) -> Result<(), InitError> {
    Mounts::compute(area, true).verify(ui_settings.card_width, ui_settings.card_height)
}

/// Run the startup checks in order and start the workers.
pub fn start(
    area: Rect,
    settings: &config::Settings,
    audio_events: Sender<AudioEvent>,
    outcomes: Sender<SearchOutcome>,
) -> Result<Services, InitError> {
    check_mounts(area, &settings.ui)?;

    let audio_player = AudioPlayer::new(
        settings.audio.clone(),
        &settings.search.user_agent,
        audio_events,
    )?;

    let backend =
        HttpSearch::new(&settings.search).map_err(|e| InitError::Client(e.to_string()))?;
    let search = SearchWorker::spawn(Box::new(backend), outcomes);

    Ok(Services {
        playback: audio_player.playback_handle(),
        audio: Box::new(audio_player),
        search,
    })
}

/// Replace the screen with the fatal message and wait for a key press.
pub fn show_fatal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    err: &InitError,
) -> io::Result<()> {
    log::error!("{err}");
    terminal.draw(ui::draw_fatal)?;
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}
