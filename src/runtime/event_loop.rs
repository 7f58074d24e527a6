use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PlaybackState};
use crate::audio::{AudioCmd, AudioEvent, PlaybackError};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::update_mpris;
use crate::runtime::opener::{self, OpenError};
use crate::runtime::startup::Services;
use crate::search::{Platform, SearchOutcome};
use crate::ui::{self, Hit, HitMap};

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Clickable regions of the last frame.
    pub hits: HitMap,
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last now-playing preview and playback state emitted to MPRIS.
    last_mpris: (Option<String>, PlaybackState),
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `app`.
    pub fn new(app: &App) -> Self {
        Self {
            hits: HitMap::default(),
            pending_gg: false,
            last_mpris: mpris_key(app),
        }
    }
}

/// Receiving ends of the worker channels.
pub struct Inbox<'a> {
    pub searches: &'a mpsc::Receiver<SearchOutcome>,
    pub audio: &'a mpsc::Receiver<AudioEvent>,
    pub controls: &'a mpsc::Receiver<ControlCmd>,
}

fn mpris_key(app: &App) -> (Option<String>, PlaybackState) {
    (
        app.player.now_playing.as_ref().map(|t| t.preview_url.clone()),
        app.player.playback,
    )
}

/// Main terminal event loop: handles input, UI drawing and the results of
/// the search, audio and MPRIS threads. Returns `Ok(())` when shutdown is
/// requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    services: &Services,
    mpris: &MprisHandle,
    inbox: Inbox<'_>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(outcome) = inbox.searches.try_recv() {
            let found = outcome.result.as_ref().map(Vec::len).ok();
            if app.settle_search(outcome.id, outcome.result) {
                if let Some(n) = found {
                    log::info!("search {:?}: {n} results", outcome.term);
                }
            }
        }

        while let Ok(ev) = inbox.audio.try_recv() {
            handle_audio_event(ev, app);
        }

        // Keep MPRIS in sync even when playback changes come from the audio thread.
        let key = mpris_key(app);
        if key != state.last_mpris {
            update_mpris(mpris, app);
            state.last_mpris = key;
        }

        let mut rendered = ui::RenderOutput::default();
        terminal.draw(|f| {
            rendered = ui::draw(f, app, &settings.ui);
        })?;
        state.hits = rendered.hits;
        app.columns = rendered.columns;

        while let Ok(cmd) = inbox.controls.try_recv() {
            if handle_control_cmd(cmd, settings, app, services) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, settings, app, services, state) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, settings, app, services, state),
                _ => {}
            }
        }
    }

    Ok(())
}

pub(super) fn handle_audio_event(ev: AudioEvent, app: &mut App) {
    match ev {
        AudioEvent::Started { preview_url } => app.playback_started(&preview_url),
        AudioEvent::Failed { preview_url, error } => app.playback_failed(&preview_url, &error),
        AudioEvent::Finished { preview_url } => app.playback_finished(&preview_url),
    }
}

fn quit(settings: &config::Settings, services: &Services) {
    log::info!("quitting");
    services
        .audio
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
}

/// Hand `cmd` to the audio thread. A player that is gone can no longer play
/// anything, so the preview stops and the playback dialog opens.
fn send_audio(cmd: AudioCmd, app: &mut App, services: &Services) {
    if let Err(e) = services.audio.send(cmd) {
        log::error!("audio thread is gone, dropped {:?}", e.0);
        app.stop();
        app.show_error(PlaybackError::TITLE, PlaybackError::MESSAGE);
    }
}

fn start_search(term: &str, app: &mut App, services: &Services) {
    let ticket = app.begin_search(term);
    log::info!("searching for {term:?} (#{})", ticket.id);
    if let Err(e) = services.search.submit(ticket) {
        log::error!("search worker is gone: {e}");
    }
}

fn play_card(index: usize, app: &mut App, services: &Services) {
    if let Some(preview_url) = app.play(index) {
        send_audio(AudioCmd::Play { preview_url }, app, services);
    }
}

fn open_link(index: usize, platform: Platform, settings: &config::Settings, app: &mut App) {
    let Some(url) = app.link(index, platform) else {
        return;
    };
    app.set_selected(index);
    if let Err(e) = opener::open(&url, settings.links.open_command.as_deref()) {
        log::error!("could not open {} link {url}: {e}", platform.label());
        app.show_error(OpenError::TITLE, OpenError::MESSAGE);
    }
}

fn toggle_pause(app: &mut App, services: &Services) {
    if app.toggle_pause() {
        send_audio(AudioCmd::TogglePause, app, services);
    }
}

fn play_neighbour(offset: isize, app: &mut App, services: &Services) {
    if let Some(index) = app.neighbour_of_now_playing(offset) {
        play_card(index, app, services);
    }
}

/// Card to start when asked to play with nothing loaded.
fn resume_target(app: &App) -> Option<usize> {
    let np = app.player.now_playing.as_ref();
    np.and_then(|np| app.tracks.iter().position(|t| t.preview_url == np.preview_url))
        .or_else(|| app.has_tracks().then_some(app.selected))
}

pub(super) fn handle_control_cmd(
    cmd: ControlCmd,
    settings: &config::Settings,
    app: &mut App,
    services: &Services,
) -> bool {
    match cmd {
        ControlCmd::Quit => {
            quit(settings, services);
            return true;
        }
        ControlCmd::Play => match app.player.playback {
            PlaybackState::Paused => toggle_pause(app, services),
            PlaybackState::Stopped => {
                if let Some(index) = resume_target(app) {
                    play_card(index, app, services);
                }
            }
            PlaybackState::Playing => {}
        },
        ControlCmd::Pause => {
            if app.player.playback == PlaybackState::Playing {
                toggle_pause(app, services);
            }
        }
        ControlCmd::PlayPause => match app.player.playback {
            PlaybackState::Stopped => {
                if let Some(index) = resume_target(app) {
                    play_card(index, app, services);
                }
            }
            PlaybackState::Playing | PlaybackState::Paused => toggle_pause(app, services),
        },
        ControlCmd::Stop => {
            app.stop();
            send_audio(AudioCmd::Stop, app, services);
        }
        ControlCmd::Next => play_neighbour(1, app, services),
        ControlCmd::Prev => play_neighbour(-1, app, services),
    }

    false
}

pub(super) fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    services: &Services,
    state: &mut EventLoopState,
) -> bool {
    if app.dialog.is_some() {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('x') => app.dismiss_error(),
            KeyCode::Char('q') => {
                quit(settings, services);
                return true;
            }
            _ => {}
        }
        return false;
    }

    if app.editing {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc => app.stop_editing(),
            KeyCode::Backspace => app.pop_input_char(),
            KeyCode::Enter => {
                if let Some(term) = app.submit_input() {
                    start_search(&term, app, services);
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if !c.is_control() {
                    app.push_input_char(c);
                }
            }
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            quit(settings, services);
            return true;
        }
        KeyCode::Char('/') | KeyCode::Char('i') => {
            state.pending_gg = false;
            app.start_editing();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.last();
        }
        KeyCode::Char('h') | KeyCode::Left => {
            state.pending_gg = false;
            app.prev();
        }
        KeyCode::Char('l') | KeyCode::Right => {
            state.pending_gg = false;
            app.next();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.down();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.up();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            if app.has_tracks() {
                play_card(app.selected, app, services);
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.pending_gg = false;
            toggle_pause(app, services);
        }
        KeyCode::Char('n') => {
            state.pending_gg = false;
            play_neighbour(1, app, services);
        }
        KeyCode::Char('N') => {
            state.pending_gg = false;
            play_neighbour(-1, app, services);
        }
        KeyCode::Char(c) => {
            state.pending_gg = false;
            if let Some(platform) = Platform::from_key(c) {
                if app.has_tracks() {
                    open_link(app.selected, platform, settings, app);
                }
            }
        }
        _ => {}
    }

    false
}

pub(super) fn handle_mouse_event(
    mouse: MouseEvent,
    settings: &config::Settings,
    app: &mut App,
    services: &Services,
    state: &mut EventLoopState,
) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    state.pending_gg = false;

    let hit = state.hits.at(mouse.column, mouse.row);
    if app.dialog.is_some() {
        if hit == Some(Hit::CloseDialog) {
            app.dismiss_error();
        }
        return;
    }

    match hit {
        Some(Hit::SearchInput) => app.start_editing(),
        Some(Hit::Play(index)) => {
            app.stop_editing();
            play_card(index, app, services);
        }
        Some(Hit::Link(index, platform)) => {
            app.stop_editing();
            open_link(index, platform, settings, app);
        }
        Some(Hit::Dialog) | Some(Hit::CloseDialog) => {}
        None => app.stop_editing(),
    }
}
