//! Application model types: `App`, `ViewState`, `PlayerState` and friends.
//!
//! `App` is the single owner of everything the screen shows. Every user
//! action and every worker result goes through one of its methods; the UI
//! only reads it.

use crate::audio::{PlaybackError, PlaybackHandle};
use crate::search::{Platform, SearchError, SearchTicket, Track, href};

/// Heading shown above the results grid.
pub const RESULTS_TITLE: &str = "Discover new music";

/// The playback state of the current preview.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Which part of the results area is visible. Exactly one at a time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing searched yet.
    #[default]
    Initial,
    /// A search is in flight; the loader is shown.
    Loading,
    /// The grid holds this many cards.
    Results(usize),
    /// The last search matched nothing.
    Empty,
    /// The last search failed; the error dialog explains.
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorDialog {
    pub title: String,
    pub message: String,
}

/// What the now-playing bar shows.
#[derive(Clone, Debug, Default)]
pub struct PlayerState {
    pub now_playing: Option<Track>,
    /// Set on the first play and never cleared.
    pub bar_revealed: bool,
    pub playback: PlaybackState,
}

/// The main application model.
pub struct App {
    pub tracks: Vec<Track>,
    pub view: ViewState,
    pub results_title: String,
    pub selected: usize,
    /// Cards per grid row, as laid out in the last frame.
    pub columns: usize,

    pub input: String,
    pub editing: bool,

    pub player: PlayerState,
    pub playback_handle: Option<PlaybackHandle>,
    pub dialog: Option<ErrorDialog>,

    pub artwork_resolution: u32,
    last_ticket: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            view: ViewState::Initial,
            results_title: RESULTS_TITLE.to_string(),
            selected: 0,
            columns: 1,
            input: String::new(),
            editing: false,
            player: PlayerState::default(),
            playback_handle: None,
            dialog: None,
            artwork_resolution: 400,
            last_ticket: 0,
        }
    }

    /// Attach a `PlaybackHandle` used to observe playback progress.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }

    // ---- search ----

    /// Start a search for `term`: clear the previous results, show the
    /// loader and hand out the ticket the worker must answer.
    pub fn begin_search(&mut self, term: &str) -> SearchTicket {
        self.last_ticket += 1;
        self.tracks.clear();
        self.selected = 0;
        self.view = ViewState::Loading;
        self.results_title = RESULTS_TITLE.to_string();

        SearchTicket {
            id: self.last_ticket,
            term: term.to_string(),
        }
    }

    /// Id of the newest search, or `None` before the first one.
    pub fn current_ticket(&self) -> Option<u64> {
        (self.last_ticket > 0).then_some(self.last_ticket)
    }

    pub fn is_loading(&self) -> bool {
        self.view == ViewState::Loading
    }

    /// Apply the outcome of search `id`. Returns false, changing nothing,
    /// when a newer search has started since.
    pub fn settle_search(&mut self, id: u64, result: Result<Vec<Track>, SearchError>) -> bool {
        if id != self.last_ticket {
            log::debug!("dropping outcome of superseded search #{id}");
            return false;
        }

        match result {
            Ok(tracks) if tracks.is_empty() => {
                self.tracks = tracks;
                self.view = ViewState::Empty;
            }
            Ok(tracks) => {
                self.view = ViewState::Results(tracks.len());
                self.tracks = tracks;
            }
            Err(e) => {
                log::error!("Search failed: {e}");
                self.tracks.clear();
                self.view = ViewState::Failed;
                self.show_error(SearchError::TITLE, SearchError::MESSAGE);
            }
        }
        self.selected = 0;
        true
    }

    /// Text for the result count slot next to the title. It stays blank in
    /// every state; the grid itself shows how many songs matched.
    pub fn results_count(&self) -> &'static str {
        ""
    }

    // ---- playback ----

    /// Play the card at `index`: update the now-playing bar and return the
    /// preview URL the audio thread should load.
    pub fn play(&mut self, index: usize) -> Option<String> {
        let track = self.tracks.get(index)?.clone();
        let preview_url = track.preview_url.clone();

        self.selected = index;
        self.player.now_playing = Some(track);
        self.player.bar_revealed = true;
        self.player.playback = PlaybackState::Playing;
        Some(preview_url)
    }

    fn is_now_playing(&self, preview_url: &str) -> bool {
        self.player
            .now_playing
            .as_ref()
            .is_some_and(|t| t.preview_url == preview_url)
    }

    /// The audio thread started `preview_url`. A pause requested while the
    /// preview was still loading is queued behind the play command, so
    /// `Paused` is kept as is.
    pub fn playback_started(&mut self, preview_url: &str) {
        if self.is_now_playing(preview_url) && self.player.playback == PlaybackState::Stopped {
            self.player.playback = PlaybackState::Playing;
        }
    }

    /// The audio thread could not play `preview_url`. The now-playing
    /// metadata stays as it is.
    pub fn playback_failed(&mut self, preview_url: &str, error: &PlaybackError) {
        log::error!("Audio play failed: {error}");
        if !self.is_now_playing(preview_url) {
            log::debug!("ignoring failure of a preview that is no longer current");
            return;
        }
        self.player.playback = PlaybackState::Stopped;
        self.show_error(PlaybackError::TITLE, PlaybackError::MESSAGE);
    }

    pub fn playback_finished(&mut self, preview_url: &str) {
        if self.is_now_playing(preview_url) {
            self.player.playback = PlaybackState::Stopped;
        }
    }

    /// Flip between playing and paused. Returns false when there is nothing
    /// to pause or resume.
    pub fn toggle_pause(&mut self) -> bool {
        self.player.playback = match self.player.playback {
            PlaybackState::Playing => PlaybackState::Paused,
            PlaybackState::Paused => PlaybackState::Playing,
            PlaybackState::Stopped => return false,
        };
        true
    }

    pub fn stop(&mut self) {
        self.player.playback = PlaybackState::Stopped;
    }

    /// Index of the card `offset` positions away from the now-playing one,
    /// wrapping around. Falls back to the selection when the now-playing
    /// track is not part of the current results.
    pub fn neighbour_of_now_playing(&self, offset: isize) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        let len = self.tracks.len() as isize;
        let base = self
            .player
            .now_playing
            .as_ref()
            .and_then(|np| self.tracks.iter().position(|t| t.preview_url == np.preview_url));

        match base {
            Some(pos) => Some((pos as isize + offset).rem_euclid(len) as usize),
            None => Some(self.selected.min(self.tracks.len() - 1)),
        }
    }

    // ---- links ----

    /// Href of `platform`'s link on the card at `index`.
    pub fn link(&self, index: usize, platform: Platform) -> Option<String> {
        self.tracks.get(index).map(|t| href(t, platform))
    }

    // ---- dialog ----

    pub fn show_error(&mut self, title: &str, message: &str) {
        self.dialog = Some(ErrorDialog {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    pub fn dismiss_error(&mut self) {
        self.dialog = None;
    }

    // ---- search input ----

    pub fn start_editing(&mut self) {
        self.editing = true;
    }

    pub fn stop_editing(&mut self) {
        self.editing = false;
    }

    pub fn push_input_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_input_char(&mut self) {
        self.input.pop();
    }

    /// Submit the search box. Returns the trimmed term, or `None` when the
    /// box is blank (a blank submit is ignored).
    pub fn submit_input(&mut self) -> Option<String> {
        let term = self.input.trim();
        if term.is_empty() {
            return None;
        }
        let term = term.to_string();
        self.editing = false;
        Some(term)
    }

    // ---- grid navigation ----

    /// Set the selected card, clamped to the current results.
    pub fn set_selected(&mut self, idx: usize) {
        self.selected = idx.min(self.tracks.len().saturating_sub(1));
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    /// Move selection to the next card (wraps).
    pub fn next(&mut self) {
        if self.has_tracks() {
            self.selected = (self.selected + 1) % self.tracks.len();
        }
    }

    /// Move selection to the previous card (wraps).
    pub fn prev(&mut self) {
        if self.has_tracks() {
            self.selected = (self.selected + self.tracks.len() - 1) % self.tracks.len();
        }
    }

    /// Move selection one grid row down, staying put on the last row.
    pub fn down(&mut self) {
        let target = self.selected + self.columns.max(1);
        if target < self.tracks.len() {
            self.selected = target;
        }
    }

    /// Move selection one grid row up, staying put on the first row.
    pub fn up(&mut self) {
        if let Some(target) = self.selected.checked_sub(self.columns.max(1)) {
            self.selected = target;
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.tracks.len().saturating_sub(1);
    }
}
