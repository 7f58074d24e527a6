use crate::app::App;
use crate::mpris::MprisHandle;

pub fn update_mpris(mpris: &MprisHandle, app: &App) {
    let track = app.player.now_playing.as_ref();
    let index = track.and_then(|np| {
        app.tracks
            .iter()
            .position(|t| t.preview_url == np.preview_url)
    });

    mpris.set_now_playing(index, track, app.artwork_resolution);
    mpris.set_playback(app.player.playback);
}
