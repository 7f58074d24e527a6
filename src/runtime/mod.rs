use std::env;
use std::sync::mpsc;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::app::App;
use crate::audio::AudioEvent;
use crate::config;
use crate::mpris::ControlCmd;
use crate::search::SearchOutcome;

mod event_loop;
mod logging;
mod mpris_sync;
mod opener;
mod settings;
mod startup;

#[cfg(test)]
mod tests;

/// Search term for the first search: the first CLI argument when given and
/// not blank, else the configured default.
fn initial_term(arg: Option<String>, settings: &config::SearchSettings) -> String {
    arg.map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| settings.default_term.clone())
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    match logging::init_logging(&settings.log) {
        Ok(Some(path)) => log::info!(
            "tunepeek {} starting, logging to {}",
            env!("CARGO_PKG_VERSION"),
            path.display()
        ),
        Ok(None) => {}
        Err(e) => eprintln!("tunepeek: logging disabled: {e}"),
    }

    let term = initial_term(env::args().nth(1), &settings.search);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let (audio_tx, audio_rx) = mpsc::channel::<AudioEvent>();
        let (search_tx, search_rx) = mpsc::channel::<SearchOutcome>();

        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        let services = match startup::start(area, &settings, audio_tx, search_tx) {
            Ok(services) => services,
            Err(err) => {
                startup::show_fatal(&mut terminal, &err)?;
                return Err(err.into());
            }
        };

        let mut app = App::new();
        app.artwork_resolution = settings.ui.artwork_resolution;
        app.set_playback_handle(services.playback.clone());

        let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
        let mpris = crate::mpris::spawn_mpris(control_tx);
        mpris_sync::update_mpris(&mpris, &app);

        app.input = term.clone();
        let ticket = app.begin_search(&term);
        log::info!("searching for {term:?} (#{})", ticket.id);
        services.search.submit(ticket)?;

        let mut state = event_loop::EventLoopState::new(&app);
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &services,
            &mpris,
            event_loop::Inbox {
                searches: &search_rx,
                audio: &audio_rx,
                controls: &control_rx,
            },
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        log::error!("exiting with error: {e}");
    }
    run_result
}
