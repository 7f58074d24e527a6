//! Named screen regions ("mount points") the renderer draws into.
//!
//! `Mounts::compute` always succeeds and is used for every frame;
//! `Mounts::verify` is the startup check that every region actually got
//! some room on the terminal.

use std::fmt;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::error::InitError;

const HEADER_HEIGHT: u16 = 3;
const HEADING_HEIGHT: u16 = 1;
const NOW_PLAYING_HEIGHT: u16 = 4;
const FOOTER_HEIGHT: u16 = 3;
const COUNT_WIDTH: u16 = 12;
const ART_WIDTH: u16 = 26;

const DIALOG_WIDTH: u16 = 60;
const DIALOG_HEIGHT: u16 = 8;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mount {
    SearchForm,
    SearchInput,
    ResultsTitle,
    ResultsCount,
    ResultsGrid,
    Loader,
    NoResults,
    InitialMessage,
    NowPlayingBar,
    NowPlayingArt,
    NowPlayingTitle,
    NowPlayingArtist,
    ErrorModal,
    ErrorTitle,
    ErrorMessage,
    CloseErrorModal,
}

impl Mount {
    pub fn id(self) -> &'static str {
        match self {
            Mount::SearchForm => "searchForm",
            Mount::SearchInput => "searchInput",
            Mount::ResultsTitle => "resultsTitle",
            Mount::ResultsCount => "resultsCount",
            Mount::ResultsGrid => "resultsGrid",
            Mount::Loader => "loader",
            Mount::NoResults => "noResults",
            Mount::InitialMessage => "initialMessage",
            Mount::NowPlayingBar => "nowPlayingBar",
            Mount::NowPlayingArt => "nowPlayingArt",
            Mount::NowPlayingTitle => "nowPlayingTitle",
            Mount::NowPlayingArtist => "nowPlayingArtist",
            Mount::ErrorModal => "errorModal",
            Mount::ErrorTitle => "errorTitle",
            Mount::ErrorMessage => "errorMessage",
            Mount::CloseErrorModal => "closeErrorModal",
        }
    }
}

impl fmt::Display for Mount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Where each named region sits in the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mounts {
    pub search_form: Rect,
    pub search_input: Rect,
    pub results_title: Rect,
    pub results_count: Rect,
    pub results_grid: Rect,
    pub loader: Rect,
    pub no_results: Rect,
    pub initial_message: Rect,
    pub now_playing_bar: Rect,
    pub now_playing_art: Rect,
    pub now_playing_title: Rect,
    pub now_playing_artist: Rect,
    pub error_modal: Rect,
    pub error_title: Rect,
    pub error_message: Rect,
    pub close_error_modal: Rect,
    pub footer: Rect,
}

impl Mounts {
    /// Lay out every region inside `area`. The now-playing bar only takes
    /// room once `bar_revealed` is set.
    pub fn compute(area: Rect, bar_revealed: bool) -> Self {
        let bar_height = if bar_revealed { NOW_PLAYING_HEIGHT } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(HEADING_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(bar_height),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        let search_form = chunks[0];
        let search_input = inner(search_form);

        let heading = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(COUNT_WIDTH)])
            .split(chunks[1]);

        let results_grid = chunks[2];
        let loader = centered_rect_sized(24, 3, results_grid);
        let no_results = centered_rect_sized(48, 3, results_grid);
        let initial_message = centered_rect_sized(56, 3, results_grid);

        let now_playing_bar = chunks[3];
        let bar_inner = inner(now_playing_bar);
        let bar_cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(ART_WIDTH), Constraint::Min(1)])
            .split(bar_inner);
        let details = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(bar_cols[1]);

        let error_modal = centered_rect_sized(DIALOG_WIDTH, DIALOG_HEIGHT, area);
        let modal_inner = inner(error_modal);
        let modal_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(modal_inner);
        let close_error_modal = centered_rect_exact(9, 1, modal_rows[1]);
        let error_title = Rect {
            height: error_modal.height.min(1),
            ..error_modal
        };

        Self {
            search_form,
            search_input,
            results_title: heading[0],
            results_count: heading[1],
            results_grid,
            loader,
            no_results,
            initial_message,
            now_playing_bar,
            now_playing_art: bar_cols[0],
            now_playing_title: details[0],
            now_playing_artist: details[1],
            error_modal,
            error_title,
            error_message: modal_rows[0],
            close_error_modal,
            footer: chunks[4],
        }
    }

    fn all(&self) -> [(Mount, Rect); 16] {
        [
            (Mount::SearchForm, self.search_form),
            (Mount::SearchInput, self.search_input),
            (Mount::ResultsTitle, self.results_title),
            (Mount::ResultsCount, self.results_count),
            (Mount::ResultsGrid, self.results_grid),
            (Mount::Loader, self.loader),
            (Mount::NoResults, self.no_results),
            (Mount::InitialMessage, self.initial_message),
            (Mount::NowPlayingBar, self.now_playing_bar),
            (Mount::NowPlayingArt, self.now_playing_art),
            (Mount::NowPlayingTitle, self.now_playing_title),
            (Mount::NowPlayingArtist, self.now_playing_artist),
            (Mount::ErrorModal, self.error_modal),
            (Mount::ErrorTitle, self.error_title),
            (Mount::ErrorMessage, self.error_message),
            (Mount::CloseErrorModal, self.close_error_modal),
        ]
    }

    /// Check that every region has room, and that the grid fits at least
    /// one `card_width` x `card_height` card. Must be called on a layout
    /// computed with the bar revealed so the bar's regions are measured too.
    pub fn verify(&self, card_width: u16, card_height: u16) -> Result<(), InitError> {
        for (mount, rect) in self.all() {
            if rect.width == 0 || rect.height == 0 {
                return Err(InitError::MissingMount(mount));
            }
        }
        if self.results_grid.width < card_width || self.results_grid.height < card_height {
            return Err(InitError::MissingMount(Mount::ResultsGrid));
        }
        Ok(())
    }
}

/// Area inside a one-cell border.
pub(super) fn inner(r: Rect) -> Rect {
    Rect {
        x: r.x.saturating_add(1),
        y: r.y.saturating_add(1),
        width: r.width.saturating_sub(2),
        height: r.height.saturating_sub(2),
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
pub(super) fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2));
    height = height.min(r.height);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn centered_rect_exact(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}
