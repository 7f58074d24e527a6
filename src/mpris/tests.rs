use super::*;
use std::sync::mpsc;

fn make_track() -> Track {
    Track {
        title: "Around the World".to_string(),
        artist: "Daft Punk".to_string(),
        artwork_url: "https://is1-ssl.mzstatic.com/image/100x100bb.jpg".to_string(),
        view_url: "https://music.apple.com/us/album/around-the-world".to_string(),
        preview_url: "https://audio-ssl.itunes.apple.com/preview.m4a".to_string(),
    }
}

fn handle() -> (MprisHandle, Arc<Mutex<SharedState>>, mpsc::Receiver<()>) {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (notify_tx, notify_rx) = mpsc::channel::<()>();
    let handle = MprisHandle {
        state: state.clone(),
        notify: notify_tx,
    };
    (handle, state, notify_rx)
}

#[test]
fn set_now_playing_sets_and_clears_shared_state() {
    let (handle, state, _notify) = handle();

    let track = make_track();
    handle.set_now_playing(Some(7), Some(&track), 400);

    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Around the World"));
        assert_eq!(s.artist, vec!["Daft Punk".to_string()]);
        assert_eq!(
            s.art_url.as_deref(),
            Some("https://is1-ssl.mzstatic.com/image/400x400bb.jpg")
        );
        assert_eq!(
            s.url.as_deref(),
            Some("https://audio-ssl.itunes.apple.com/preview.m4a")
        );
        assert_eq!(
            s.track_id.as_ref().map(|p| p.as_str()),
            Some("/org/mpris/MediaPlayer2/track/7")
        );
    }

    handle.set_now_playing(None, None, 400);
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert!(s.artist.is_empty());
        assert_eq!(s.art_url, None);
        assert_eq!(s.url, None);
        assert!(s.track_id.is_none());
    }
}

#[test]
fn every_update_wakes_the_service() {
    let (handle, _state, notify) = handle();
    handle.set_playback(PlaybackState::Playing);
    handle.set_now_playing(None, None, 400);
    assert_eq!(notify.try_iter().count(), 2);
}

#[test]
fn playback_status_maps_state_to_mpris_strings() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    assert_eq!(iface.playback_status(), "Stopped");

    state.lock().unwrap().playback = PlaybackState::Playing;
    assert_eq!(iface.playback_status(), "Playing");

    state.lock().unwrap().playback = PlaybackState::Paused;
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let (handle, state, _notify) = handle();
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    assert!(iface.metadata().is_empty());

    handle.set_now_playing(Some(1), Some(&make_track()), 400);
    let map = iface.metadata();
    for k in [
        "mpris:trackid",
        "xesam:title",
        "xesam:artist",
        "mpris:artUrl",
        "xesam:url",
    ] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn player_methods_forward_control_commands() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    iface.play_pause();
    iface.next();
    iface.previous();
    iface.stop();

    let got: Vec<ControlCmd> = rx.try_iter().collect();
    assert!(matches!(
        got.as_slice(),
        [
            ControlCmd::PlayPause,
            ControlCmd::Next,
            ControlCmd::Prev,
            ControlCmd::Stop
        ]
    ));
}
