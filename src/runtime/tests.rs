use super::*;
use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, PlaybackState};
use crate::audio::{AudioCmd, PlaybackError, PlaybackInfo};
use crate::config::{LogLevelSetting, LogSettings, SearchSettings};
use crate::search::{Platform, SearchBackend, SearchError, SearchWorker, Track};
use crate::ui::Hit;

#[test]
fn initial_term_prefers_non_blank_argument() {
    let search = SearchSettings::default();
    assert_eq!(initial_term(Some("  Justice ".into()), &search), "Justice");
    assert_eq!(initial_term(Some("   ".into()), &search), "Daft Punk");
    assert_eq!(initial_term(None, &search), "Daft Punk");
}

#[test]
fn mount_check_follows_card_size() {
    let ui = config::UiSettings::default();
    assert!(startup::check_mounts(Rect::new(0, 0, 80, 24), &ui).is_ok());
    assert!(startup::check_mounts(Rect::new(0, 0, 20, 24), &ui).is_err());
}

#[test]
fn explicit_log_path_wins() {
    let settings = LogSettings {
        level: LogLevelSetting::Debug,
        path: Some("/tmp/tunepeek-test/app.log".to_string()),
    };
    assert_eq!(
        logging::resolve_log_path(&settings),
        Some(std::path::PathBuf::from("/tmp/tunepeek-test/app.log"))
    );
}

#[test]
fn logging_off_installs_nothing() {
    let settings = LogSettings {
        level: LogLevelSetting::Off,
        path: Some("/nonexistent/dir/should/not/be/created.log".to_string()),
    };
    assert!(matches!(logging::init_logging(&settings), Ok(None)));
    assert!(!std::path::Path::new("/nonexistent/dir").exists());
}

#[test]
fn configured_opener_is_looked_up_on_path() {
    assert!(opener::find_opener(Some("sh")).is_ok());
    assert!(matches!(
        opener::find_opener(Some("tunepeek-no-such-opener")),
        Err(opener::OpenError::NoOpener)
    ));
}

#[test]
fn missing_opener_surfaces_as_error() {
    let err = opener::open(
        "https://music.apple.com/",
        Some("tunepeek-no-such-opener"),
    )
    .unwrap_err();
    assert!(matches!(err, opener::OpenError::NoOpener));
}

struct NoSearch;

impl SearchBackend for NoSearch {
    fn search(&self, _term: &str) -> Result<Vec<Track>, SearchError> {
        Ok(Vec::new())
    }
}

fn track(title: &str) -> Track {
    Track {
        title: title.into(),
        artist: "Daft Punk".into(),
        artwork_url: format!("https://is1-ssl.mzstatic.com/{title}/100x100bb.jpg"),
        view_url: format!("https://music.apple.com/{title}"),
        preview_url: format!("https://audio-ssl.itunes.apple.com/{title}.m4a"),
    }
}

/// Services whose audio side is a bare channel the test can read from.
fn services() -> (startup::Services, mpsc::Receiver<AudioCmd>) {
    let (audio_tx, audio_rx) = mpsc::channel::<AudioCmd>();
    let (outcome_tx, _outcome_rx) = mpsc::channel();
    let services = startup::Services {
        audio: Box::new(audio_tx),
        playback: Arc::new(Mutex::new(PlaybackInfo::default())),
        search: SearchWorker::spawn(Box::new(NoSearch), outcome_tx),
    };
    (services, audio_rx)
}

fn settings() -> config::Settings {
    let mut settings = config::Settings::default();
    settings.links.open_command = Some("true".into());
    settings
}

fn app_with_results() -> App {
    let mut app = App::new();
    let ticket = app.begin_search("daft punk");
    app.settle_search(
        ticket.id,
        Ok(vec![track("One More Time"), track("Aerodynamic"), track("Digital Love")]),
    );
    app
}

fn state_with(app: &App, hits: &[(Rect, Hit)]) -> event_loop::EventLoopState {
    let mut state = event_loop::EventLoopState::new(app);
    for (rect, hit) in hits {
        state.hits.push(*rect, *hit);
    }
    state
}

fn click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn card() -> Rect {
    Rect::new(10, 5, 20, 4)
}

#[test]
fn clicking_a_card_plays_its_preview() {
    let (services, audio_rx) = services();
    let settings = settings();
    let mut app = app_with_results();
    let mut state = state_with(&app, &[(card(), Hit::Play(1))]);

    event_loop::handle_mouse_event(click(12, 6), &settings, &mut app, &services, &mut state);

    match audio_rx.try_recv() {
        Ok(AudioCmd::Play { preview_url }) => {
            assert_eq!(preview_url, "https://audio-ssl.itunes.apple.com/Aerodynamic.m4a")
        }
        other => panic!("expected a play command, got {other:?}"),
    }
    assert_eq!(app.selected, 1);
    assert_eq!(app.player.playback, PlaybackState::Playing);
    assert_eq!(
        app.player.now_playing.as_ref().map(|t| t.title.as_str()),
        Some("Aerodynamic")
    );
}

#[test]
fn right_click_and_empty_space_do_nothing() {
    let (services, audio_rx) = services();
    let settings = settings();
    let mut app = app_with_results();
    let mut state = state_with(&app, &[(card(), Hit::Play(0))]);

    let mut right = click(12, 6);
    right.kind = MouseEventKind::Down(MouseButton::Right);
    event_loop::handle_mouse_event(right, &settings, &mut app, &services, &mut state);
    event_loop::handle_mouse_event(click(0, 0), &settings, &mut app, &services, &mut state);

    assert!(audio_rx.try_recv().is_err());
    assert!(app.player.now_playing.is_none());
}

#[test]
fn clicking_a_link_leaves_the_player_alone() {
    let (services, audio_rx) = services();
    let settings = settings();
    let mut app = app_with_results();
    app.play(0);
    let mut state = state_with(&app, &[(Rect::new(10, 9, 6, 1), Hit::Link(2, Platform::Spotify))]);

    event_loop::handle_mouse_event(click(11, 9), &settings, &mut app, &services, &mut state);

    assert!(audio_rx.try_recv().is_err());
    assert_eq!(app.selected, 2);
    assert_eq!(
        app.player.now_playing.as_ref().map(|t| t.title.as_str()),
        Some("One More Time")
    );
    assert_eq!(app.player.playback, PlaybackState::Playing);
    assert!(app.dialog.is_none());
}

#[test]
fn open_dialog_swallows_clicks_until_closed() {
    let (services, audio_rx) = services();
    let settings = settings();
    let mut app = app_with_results();
    app.show_error("Search Failed", "Could not reach the catalog.");
    let mut state = state_with(&app, &[(card(), Hit::Play(0)), (Rect::new(40, 12, 9, 1), Hit::CloseDialog)]);

    event_loop::handle_mouse_event(click(12, 6), &settings, &mut app, &services, &mut state);
    assert!(audio_rx.try_recv().is_err());
    assert!(app.dialog.is_some());

    event_loop::handle_mouse_event(click(41, 12), &settings, &mut app, &services, &mut state);
    assert!(app.dialog.is_none());

    event_loop::handle_mouse_event(click(12, 6), &settings, &mut app, &services, &mut state);
    assert!(matches!(audio_rx.try_recv(), Ok(AudioCmd::Play { .. })));
}

#[test]
fn keys_play_pause_and_skip() {
    let (services, audio_rx) = services();
    let settings = settings();
    let mut app = app_with_results();
    let mut state = state_with(&app, &[]);

    app.next();
    assert!(!event_loop::handle_key_event(
        press(KeyCode::Enter),
        &settings,
        &mut app,
        &services,
        &mut state
    ));
    assert!(matches!(
        audio_rx.try_recv(),
        Ok(AudioCmd::Play { preview_url }) if preview_url.ends_with("Aerodynamic.m4a")
    ));

    event_loop::handle_key_event(press(KeyCode::Char(' ')), &settings, &mut app, &services, &mut state);
    assert!(matches!(audio_rx.try_recv(), Ok(AudioCmd::TogglePause)));
    assert_eq!(app.player.playback, PlaybackState::Paused);

    event_loop::handle_key_event(press(KeyCode::Char('n')), &settings, &mut app, &services, &mut state);
    assert!(matches!(
        audio_rx.try_recv(),
        Ok(AudioCmd::Play { preview_url }) if preview_url.ends_with("Digital Love.m4a")
    ));
}

#[test]
fn pause_with_nothing_loaded_sends_nothing() {
    let (services, audio_rx) = services();
    let settings = settings();
    let mut app = app_with_results();
    let mut state = state_with(&app, &[]);

    event_loop::handle_key_event(press(KeyCode::Char('p')), &settings, &mut app, &services, &mut state);
    assert!(audio_rx.try_recv().is_err());
    assert_eq!(app.player.playback, PlaybackState::Stopped);
}

#[test]
fn quit_key_asks_the_player_to_fade_out() {
    let (services, audio_rx) = services();
    let settings = settings();
    let mut app = app_with_results();
    let mut state = state_with(&app, &[]);

    assert!(event_loop::handle_key_event(
        press(KeyCode::Char('q')),
        &settings,
        &mut app,
        &services,
        &mut state
    ));
    assert!(matches!(
        audio_rx.try_recv(),
        Ok(AudioCmd::Quit { fade_out_ms }) if fade_out_ms == settings.audio.quit_fade_out_ms
    ));
}

#[test]
fn dead_audio_thread_surfaces_as_playback_error() {
    let (services, audio_rx) = services();
    drop(audio_rx);
    let settings = settings();
    let mut app = app_with_results();
    let mut state = state_with(&app, &[(card(), Hit::Play(0))]);

    event_loop::handle_mouse_event(click(12, 6), &settings, &mut app, &services, &mut state);

    assert_eq!(app.player.playback, PlaybackState::Stopped);
    let dialog = app.dialog.clone().expect("dialog should be open");
    assert_eq!(dialog.title, PlaybackError::TITLE);
    assert_eq!(dialog.message, PlaybackError::MESSAGE);

    event_loop::handle_key_event(press(KeyCode::Char('x')), &settings, &mut app, &services, &mut state);
    assert!(app.dialog.is_none());
}

#[test]
fn media_stop_reaches_the_audio_thread() {
    let (services, audio_rx) = services();
    let settings = settings();
    let mut app = app_with_results();
    app.play(0);

    assert!(!event_loop::handle_control_cmd(
        ControlCmd::Stop,
        &settings,
        &mut app,
        &services
    ));
    assert!(matches!(audio_rx.try_recv(), Ok(AudioCmd::Stop)));
    assert_eq!(app.player.playback, PlaybackState::Stopped);

    event_loop::handle_control_cmd(ControlCmd::PlayPause, &settings, &mut app, &services);
    assert!(matches!(
        audio_rx.try_recv(),
        Ok(AudioCmd::Play { preview_url }) if preview_url.ends_with("One More Time.m4a")
    ));
}

#[test]
fn started_event_keeps_a_pause_made_while_loading() {
    let mut app = app_with_results();
    let url = app.play(0).unwrap();
    assert!(app.toggle_pause());
    event_loop::handle_audio_event(
        crate::audio::AudioEvent::Started { preview_url: url },
        &mut app,
    );
    assert_eq!(app.player.playback, PlaybackState::Paused);
}
