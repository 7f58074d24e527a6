//! Card grid geometry: how many cards fit per row, which rows are on
//! screen, and where each card's play area and links sit.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::search::Platform;

use super::layout::inner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub columns: usize,
    /// Index of the first row on screen.
    pub first_row: usize,
    /// Number of rows on screen.
    pub visible_rows: usize,
}

/// Rectangles inside one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardRegions {
    pub play: Rect,
    pub links: [(Platform, Rect); 3],
}

/// Window of `visible` rows out of `total` that keeps `selected` roughly
/// centered. Returns `(start, end)`.
pub fn visible_window(total: usize, visible: usize, selected: usize) -> (usize, usize) {
    if total <= visible || visible == 0 {
        return (0, total);
    }
    let half = visible / 2;
    let mut start = selected.saturating_sub(half);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

pub fn geometry(
    area: Rect,
    card_width: u16,
    card_height: u16,
    total: usize,
    selected: usize,
) -> GridGeometry {
    let columns = (area.width / card_width.max(1)).max(1) as usize;
    let visible_rows = (area.height / card_height.max(1)).max(1) as usize;
    let total_rows = total.div_ceil(columns);
    let (first_row, end) = visible_window(total_rows, visible_rows, selected / columns);

    GridGeometry {
        columns,
        first_row,
        visible_rows: end - first_row,
    }
}

/// Rectangles of the cards on screen, paired with their track index.
pub fn card_rects(
    area: Rect,
    geo: GridGeometry,
    card_width: u16,
    card_height: u16,
    total: usize,
) -> Vec<(usize, Rect)> {
    let mut out = Vec::new();
    for row in 0..geo.visible_rows {
        for col in 0..geo.columns {
            let index = (geo.first_row + row) * geo.columns + col;
            if index >= total {
                return out;
            }
            let rect = Rect {
                x: area.x + col as u16 * card_width,
                y: area.y + row as u16 * card_height,
                width: card_width,
                height: card_height,
            }
            .intersection(area);
            out.push((index, rect));
        }
    }
    out
}

/// Split a card into its play area (everything but the bottom line) and the
/// three link buttons on the bottom line.
pub fn card_regions(card: Rect) -> CardRegions {
    let body = inner(card);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(body);
    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[1]);

    CardRegions {
        play: rows[0],
        links: [
            (Platform::Apple, buttons[0]),
            (Platform::Spotify, buttons[1]),
            (Platform::YouTube, buttons[2]),
        ],
    }
}
