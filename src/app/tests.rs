use super::*;
use crate::audio::PlaybackError;
use crate::search::{Platform, SearchError, Track, decode_results};

fn t(title: &str, artist: &str) -> Track {
    Track {
        title: title.into(),
        artist: artist.into(),
        artwork_url: format!("https://is1-ssl.mzstatic.com/{title}/100x100bb.jpg"),
        view_url: format!("https://music.apple.com/{title}"),
        preview_url: format!("https://audio-ssl.itunes.apple.com/{title}.m4a"),
    }
}

fn app_with(tracks: Vec<Track>) -> App {
    let mut app = App::new();
    let ticket = app.begin_search("seed");
    assert!(app.settle_search(ticket.id, Ok(tracks)));
    app
}

fn status_error() -> SearchError {
    SearchError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
}

fn decode_error() -> PlaybackError {
    // Any DecoderError will do; build one by decoding garbage through the
    // same path the audio thread uses.
    match rodio::Decoder::new(std::io::Cursor::new(b"nope".to_vec())) {
        Err(e) => PlaybackError::Decode(e),
        Ok(_) => panic!("garbage decoded as audio"),
    }
}

#[test]
fn starts_in_initial_state() {
    let app = App::new();
    assert_eq!(app.view, ViewState::Initial);
    assert!(app.dialog.is_none());
    assert!(!app.player.bar_revealed);
    assert_eq!(app.current_ticket(), None);
}

#[test]
fn begin_search_clears_results_and_shows_loader() {
    let mut app = app_with(vec![t("A", "x"), t("B", "y")]);
    app.selected = 1;

    let ticket = app.begin_search("Daft Punk");
    assert_eq!(ticket.term, "Daft Punk");
    assert_eq!(app.current_ticket(), Some(ticket.id));
    assert!(app.is_loading());
    assert!(app.tracks.is_empty());
    assert_eq!(app.selected, 0);
    assert_eq!(app.results_title, RESULTS_TITLE);
    assert_eq!(app.results_count(), "");
}

#[test]
fn ticket_ids_increase() {
    let mut app = App::new();
    let a = app.begin_search("a");
    let b = app.begin_search("b");
    assert!(b.id > a.id);
}

#[test]
fn zero_results_show_empty_state() {
    let mut app = App::new();
    let ticket = app.begin_search("zzzz");
    let tracks = decode_results(br#"{"resultCount":0,"results":[]}"#).unwrap();
    assert!(app.settle_search(ticket.id, Ok(tracks)));

    assert_eq!(app.view, ViewState::Empty);
    assert!(app.tracks.is_empty());
    assert!(!app.is_loading());
    assert!(app.dialog.is_none());
}

#[test]
fn results_transition_carries_count_but_shows_none() {
    let app = app_with(vec![t("A", "x"), t("B", "y"), t("C", "z")]);
    assert_eq!(app.view, ViewState::Results(3));
    assert_eq!(app.results_count(), "");
    assert_eq!(app.tracks.len(), 3);
}

#[test]
fn failed_search_shows_generic_dialog_and_hides_loader() {
    let mut app = App::new();
    let ticket = app.begin_search("Daft Punk");
    assert!(app.settle_search(ticket.id, Err(status_error())));

    assert_eq!(app.view, ViewState::Failed);
    assert!(!app.is_loading());
    let dialog = app.dialog.clone().unwrap();
    assert_eq!(dialog.title, "Search Failed");
    assert_eq!(
        dialog.message,
        "Could not fetch music data. Please check your connection and try again."
    );
    // Technical detail stays out of the dialog.
    assert!(!dialog.message.contains("500"));
}

#[test]
fn stale_outcome_is_ignored() {
    let mut app = App::new();
    let first = app.begin_search("first");
    let second = app.begin_search("second");

    assert!(!app.settle_search(first.id, Ok(vec![t("Old", "x")])));
    assert!(app.is_loading());
    assert!(app.tracks.is_empty());

    assert!(app.settle_search(second.id, Ok(vec![t("New", "y")])));
    assert_eq!(app.tracks[0].title, "New");
}

#[test]
fn failed_state_accepts_new_search() {
    let mut app = App::new();
    let ticket = app.begin_search("x");
    app.settle_search(ticket.id, Err(status_error()));

    let ticket = app.begin_search("y");
    assert!(app.is_loading());
    assert!(app.settle_search(ticket.id, Ok(vec![t("Y", "y")])));
    assert_eq!(app.view, ViewState::Results(1));
}

#[test]
fn play_sets_now_playing_and_reveals_bar() {
    let mut app = app_with(vec![t("A", "x"), t("Around the World", "Daft Punk")]);

    let url = app.play(1).unwrap();
    assert_eq!(url, "https://audio-ssl.itunes.apple.com/Around the World.m4a");

    let np = app.player.now_playing.clone().unwrap();
    assert_eq!(np.title, "Around the World");
    assert_eq!(np.artist, "Daft Punk");
    assert_eq!(
        np.artwork(400),
        "https://is1-ssl.mzstatic.com/Around the World/400x400bb.jpg"
    );
    assert!(app.player.bar_revealed);
    assert_eq!(app.player.playback, PlaybackState::Playing);
    assert_eq!(app.selected, 1);

    // Still revealed on the next play.
    app.play(0).unwrap();
    assert!(app.player.bar_revealed);
    assert_eq!(app.player.now_playing.as_ref().unwrap().title, "A");
}

#[test]
fn play_out_of_range_does_nothing() {
    let mut app = app_with(vec![t("A", "x")]);
    assert!(app.play(5).is_none());
    assert!(app.player.now_playing.is_none());
    assert!(!app.player.bar_revealed);
}

#[test]
fn playback_failure_keeps_now_playing_metadata() {
    let mut app = app_with(vec![t("A", "x")]);
    let url = app.play(0).unwrap();

    app.playback_failed(&url, &decode_error());

    assert_eq!(app.player.now_playing.as_ref().unwrap().title, "A");
    assert_eq!(app.player.playback, PlaybackState::Stopped);
    let dialog = app.dialog.clone().unwrap();
    assert_eq!(dialog.title, "Playback Error");
    assert_eq!(dialog.message, "Could not play the audio preview.");
}

#[test]
fn failure_of_superseded_preview_is_not_shown() {
    let mut app = app_with(vec![t("A", "x"), t("B", "y")]);
    let first = app.play(0).unwrap();
    app.play(1).unwrap();

    app.playback_failed(&first, &decode_error());
    assert!(app.dialog.is_none());
    assert_eq!(app.player.playback, PlaybackState::Playing);
}

#[test]
fn opening_a_link_does_not_touch_player() {
    let mut app = app_with(vec![t("A", "x"), t("Around the World", "Daft Punk")]);
    app.play(0).unwrap();

    let spotify = app.link(1, Platform::Spotify).unwrap();
    assert!(spotify.contains("Around%20the%20World%20Daft%20Punk"));
    assert_eq!(app.link(1, Platform::Apple).unwrap(), app.tracks[1].view_url);

    assert_eq!(app.player.now_playing.as_ref().unwrap().title, "A");
    assert_eq!(app.player.playback, PlaybackState::Playing);
    assert!(app.link(7, Platform::YouTube).is_none());
}

#[test]
fn dismiss_error_only_hides_dialog() {
    let mut app = app_with(vec![t("A", "x"), t("B", "y")]);
    app.play(1).unwrap();
    app.show_error("Playback Error", "Could not play the audio preview.");

    let view = app.view;
    let selected = app.selected;
    let now_playing = app.player.now_playing.clone();

    app.dismiss_error();
    assert!(app.dialog.is_none());
    assert_eq!(app.view, view);
    assert_eq!(app.selected, selected);
    assert_eq!(app.player.now_playing, now_playing);
    assert!(app.player.bar_revealed);
}

#[test]
fn toggle_pause_cycles_only_when_something_is_loaded() {
    let mut app = app_with(vec![t("A", "x")]);
    assert!(!app.toggle_pause());

    app.play(0).unwrap();
    assert!(app.toggle_pause());
    assert_eq!(app.player.playback, PlaybackState::Paused);
    assert!(app.toggle_pause());
    assert_eq!(app.player.playback, PlaybackState::Playing);
}

#[test]
fn finished_preview_stops() {
    let mut app = app_with(vec![t("A", "x")]);
    let url = app.play(0).unwrap();
    app.playback_finished(&url);
    assert_eq!(app.player.playback, PlaybackState::Stopped);
    assert!(app.player.now_playing.is_some());
}

#[test]
fn submit_input_trims_and_ignores_blank() {
    let mut app = App::new();
    app.start_editing();
    for c in "   ".chars() {
        app.push_input_char(c);
    }
    assert_eq!(app.submit_input(), None);
    assert!(app.editing);

    app.input = "  Justice ".into();
    assert_eq!(app.submit_input().as_deref(), Some("Justice"));
    assert!(!app.editing);

    app.pop_input_char();
    assert_eq!(app.input, "  Justice");
}

#[test]
fn grid_navigation_respects_columns() {
    let tracks = (0..7).map(|i| t(&format!("T{i}"), "x")).collect();
    let mut app = app_with(tracks);
    app.columns = 3;

    app.down();
    assert_eq!(app.selected, 3);
    app.down();
    assert_eq!(app.selected, 6);
    app.down();
    assert_eq!(app.selected, 6);
    app.up();
    assert_eq!(app.selected, 3);
    app.prev();
    assert_eq!(app.selected, 2);
    app.first();
    app.prev();
    assert_eq!(app.selected, 6);
    app.next();
    assert_eq!(app.selected, 0);
    app.last();
    assert_eq!(app.selected, 6);
}

#[test]
fn neighbour_of_now_playing_wraps() {
    let mut app = app_with(vec![t("A", "x"), t("B", "y"), t("C", "z")]);
    assert_eq!(app.neighbour_of_now_playing(1), Some(0));

    app.play(2).unwrap();
    assert_eq!(app.neighbour_of_now_playing(1), Some(0));
    assert_eq!(app.neighbour_of_now_playing(-1), Some(1));
}

#[test]
fn pause_during_load_survives_started_event() {
    let mut app = app_with(vec![t("A", "x")]);
    let url = app.play(0).unwrap();
    assert!(app.toggle_pause());

    app.playback_started(&url);
    assert_eq!(app.player.playback, PlaybackState::Paused);

    assert!(app.toggle_pause());
    assert_eq!(app.player.playback, PlaybackState::Playing);
}

#[test]
fn started_event_restores_playing_after_stop() {
    let mut app = app_with(vec![t("A", "x")]);
    let url = app.play(0).unwrap();
    app.stop();

    app.playback_started(&url);
    assert_eq!(app.player.playback, PlaybackState::Playing);
}
