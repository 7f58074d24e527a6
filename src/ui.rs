//! UI rendering helpers for the terminal user interface.
//!
//! This module renders the `App` with `ratatui`. Drawing also produces a
//! `HitMap` so mouse clicks can be routed to whatever was drawn under them.

mod grid;
mod layout;

use ratatui::{
    Frame,
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::app::{App, PlaybackState, ViewState};
use crate::config::UiSettings;
use crate::error::InitError;
use crate::search::Platform;

pub use grid::{CardRegions, GridGeometry, card_regions, card_rects, geometry, visible_window};
pub use layout::{Mount, Mounts};

const INITIAL_MESSAGE: &str = "Press / to search for a song or an artist.";
const NO_RESULTS: &str = "No results found. Try a different search.";
const LOADING: &str = "Searching…";

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("/".to_string(), "search".to_string());
    map.insert("hjkl".to_string(), "move".to_string());
    map.insert("gg/G".to_string(), "first/last".to_string());
    map.insert("enter".to_string(), "play preview".to_string());
    map.insert("space/p".to_string(), "pause".to_string());
    map.insert("n/N".to_string(), "next/prev card".to_string());
    map.insert("1/2/3".to_string(), "Apple/Spotify/YouTube".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text for the current input mode.
fn controls_text(app: &App) -> String {
    if app.dialog.is_some() {
        return "[esc/enter/x] close | [q] quit".to_string();
    }
    if app.editing {
        return "[enter] search | [esc] cancel | [backspace] delete".to_string();
    }
    // Keep the rendered order stable and human-friendly.
    let order = ["/", "hjkl", "gg/G", "enter", "space/p", "n/N", "1/2/3", "q"];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Cut `s` to at most `max` characters, marking the cut with an ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Something clickable drawn in the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    SearchInput,
    Play(usize),
    Link(usize, Platform),
    /// The dialog body; swallows clicks.
    Dialog,
    CloseDialog,
}

/// Clickable regions, later entries drawn on top of earlier ones.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Hit)>,
}

impl HitMap {
    pub fn push(&mut self, rect: Rect, hit: Hit) {
        if rect.width > 0 && rect.height > 0 {
            self.regions.push((rect, hit));
        }
    }

    /// Topmost hit under the cell at `(column, row)`.
    pub fn at(&self, column: u16, row: u16) -> Option<Hit> {
        let pos = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, hit)| *hit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Rect, Hit)> {
        self.regions.iter()
    }
}

/// What the event loop needs to know about the frame just drawn.
#[derive(Debug, Clone, Default)]
pub struct RenderOutput {
    pub hits: HitMap,
    pub columns: usize,
}

/// Render the entire UI into `frame` and report the clickable regions.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) -> RenderOutput {
    let mounts = Mounts::compute(frame.area(), app.player.bar_revealed);
    let mut out = RenderOutput {
        columns: 1,
        ..Default::default()
    };

    draw_search_form(frame, app, ui_settings, &mounts);
    out.hits.push(mounts.search_form, Hit::SearchInput);

    draw_heading(frame, app, &mounts);

    match app.view {
        ViewState::Initial => draw_notice(frame, mounts.initial_message, INITIAL_MESSAGE, false),
        ViewState::Loading => draw_notice(frame, mounts.loader, LOADING, true),
        ViewState::Empty => draw_notice(frame, mounts.no_results, NO_RESULTS, false),
        ViewState::Failed => {}
        ViewState::Results(_) => {
            out.columns = draw_grid(frame, app, ui_settings, mounts.results_grid, &mut out.hits);
        }
    }

    if app.player.bar_revealed {
        draw_now_playing(frame, app, ui_settings, &mounts);
    }

    let footer = Paragraph::new(controls_text(app))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, mounts.footer);

    if let Some(dialog) = &app.dialog {
        frame.render_widget(Clear, mounts.error_modal);
        let modal = Block::bordered()
            .border_style(Style::default().fg(Color::Red))
            .title(format!(" {} ", dialog.title))
            .title_alignment(Alignment::Center);
        frame.render_widget(modal, mounts.error_modal);

        let message = Paragraph::new(dialog.message.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(message, mounts.error_message);

        let close = Paragraph::new("[ close ]").reversed();
        frame.render_widget(close, mounts.close_error_modal);

        out.hits.push(mounts.error_modal, Hit::Dialog);
        out.hits.push(mounts.close_error_modal, Hit::CloseDialog);
    }

    out
}

fn draw_search_form(frame: &mut Frame, app: &App, ui_settings: &UiSettings, mounts: &Mounts) {
    let border = if app.editing {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let form = Block::bordered()
        .border_style(border)
        .title(ui_settings.header_text.as_str())
        .title_alignment(Alignment::Center);
    frame.render_widget(form, mounts.search_form);

    let input = if app.input.is_empty() && !app.editing {
        Paragraph::new("Search for a song or an artist…").dim()
    } else {
        Paragraph::new(app.input.as_str())
    };
    frame.render_widget(input, mounts.search_input);

    if app.editing {
        let typed = app.input.chars().count() as u16;
        let x = mounts
            .search_input
            .x
            .saturating_add(typed)
            .min(mounts.search_input.right().saturating_sub(1));
        frame.set_cursor_position((x, mounts.search_input.y));
    }
}

fn draw_heading(frame: &mut Frame, app: &App, mounts: &Mounts) {
    let title = Paragraph::new(app.results_title.as_str()).bold();
    frame.render_widget(title, mounts.results_title);

    let count = Paragraph::new(app.results_count())
        .alignment(Alignment::Right)
        .dim();
    frame.render_widget(count, mounts.results_count);
}

fn draw_notice(frame: &mut Frame, area: Rect, text: &str, blink: bool) {
    let mut notice = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray)));
    if blink {
        notice = notice.slow_blink();
    }
    frame.render_widget(notice, area);
}

/// Draw the visible cards. Returns the number of columns used.
fn draw_grid(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    area: Rect,
    hits: &mut HitMap,
) -> usize {
    let total = app.tracks.len();
    let geo = geometry(
        area,
        ui_settings.card_width,
        ui_settings.card_height,
        total,
        app.selected,
    );

    for (index, rect) in card_rects(
        area,
        geo,
        ui_settings.card_width,
        ui_settings.card_height,
        total,
    ) {
        let regions = draw_card(frame, app, index, rect);
        hits.push(regions.play, Hit::Play(index));
        for (platform, r) in regions.links {
            hits.push(r, Hit::Link(index, platform));
        }
    }

    geo.columns
}

fn link_style(platform: Platform) -> Style {
    let bg = match platform {
        Platform::Apple => Color::DarkGray,
        Platform::Spotify => Color::Green,
        Platform::YouTube => Color::Red,
    };
    Style::default()
        .bg(bg)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn draw_card(frame: &mut Frame, app: &App, index: usize, rect: Rect) -> CardRegions {
    let track = &app.tracks[index];
    let selected = index == app.selected;
    let current = app
        .player
        .now_playing
        .as_ref()
        .is_some_and(|np| np.preview_url == track.preview_url);

    let border = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let card = Block::bordered()
        .border_style(border)
        .title(format!(" {} ", index + 1));
    frame.render_widget(card, rect);

    let regions = card_regions(rect);
    let width = regions.play.width as usize;

    let glyph = match (current, app.player.playback) {
        (true, PlaybackState::Playing) => "▶ playing",
        (true, PlaybackState::Paused) => "⏸ paused",
        _ if selected => "▶ play preview",
        _ => "♪",
    };
    let lines = vec![
        Line::from(Span::styled(glyph, Style::default().fg(Color::Cyan))),
        Line::from(truncate(&track.title, width)).bold(),
        Line::from(truncate(&track.artist, width)).gray(),
    ];
    frame.render_widget(Paragraph::new(lines), regions.play);

    for (platform, r) in regions.links {
        let label = truncate(platform.label(), r.width as usize);
        let button = Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(link_style(platform));
        frame.render_widget(button, r);
    }

    regions
}

fn draw_now_playing(frame: &mut Frame, app: &App, ui_settings: &UiSettings, mounts: &Mounts) {
    let bar = Block::bordered().title(" now playing ");
    frame.render_widget(bar, mounts.now_playing_bar);

    let Some(track) = &app.player.now_playing else {
        return;
    };

    let art_url = track.artwork(ui_settings.artwork_resolution);
    let art_width = mounts.now_playing_art.width as usize;
    let art = Paragraph::new(vec![
        Line::from(Span::styled("♫ artwork", Style::default().fg(Color::Cyan))),
        Line::from(truncate(&art_url, art_width.saturating_sub(1))).dim(),
    ]);
    frame.render_widget(art, mounts.now_playing_art);

    let title_width = mounts.now_playing_title.width as usize;
    frame.render_widget(
        Paragraph::new(truncate(&track.title, title_width)).bold(),
        mounts.now_playing_title,
    );

    let mut parts = vec![track.artist.clone()];
    if let Some(ref h) = app.playback_handle {
        if let Ok(info) = h.lock() {
            if info.preview_url.as_deref() == Some(track.preview_url.as_str()) {
                match info.total {
                    Some(total) => parts.push(format!(
                        "{} / {}",
                        format_mmss(info.elapsed),
                        format_mmss(total)
                    )),
                    None => parts.push(format_mmss(info.elapsed)),
                }
            }
        }
    }
    parts.push(
        match app.player.playback {
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
            PlaybackState::Stopped => "Stopped",
        }
        .to_string(),
    );
    let artist_width = mounts.now_playing_artist.width as usize;
    frame.render_widget(
        Paragraph::new(truncate(&parts.join(" • "), artist_width)).gray(),
        mounts.now_playing_artist,
    );
}

/// Replace the whole screen with the fatal startup message.
pub fn draw_fatal(frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(Clear, area);
    let y = area.y + area.height / 2;
    let line = Rect {
        x: area.x,
        y: y.min(area.bottom().saturating_sub(1)),
        width: area.width,
        height: area.height.min(2),
    };
    let text = Paragraph::new(vec![
        Line::from(InitError::SCREEN),
        Line::from("Press any key to exit.").dim(),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(text, line);
}
