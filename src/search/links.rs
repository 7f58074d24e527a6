//! Outbound links shown on every card.
//!
//! The catalog's own store page is linked directly; the other platforms get
//! a search URL built from the track title and artist.

use super::model::Track;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Platform {
    Apple,
    Spotify,
    YouTube,
}

impl Platform {
    /// Card order, left to right.
    pub const ALL: [Platform; 3] = [Platform::Apple, Platform::Spotify, Platform::YouTube];

    pub fn label(self) -> &'static str {
        match self {
            Platform::Apple => "Apple",
            Platform::Spotify => "Spotify",
            Platform::YouTube => "YouTube",
        }
    }

    /// Key that activates this link on the selected card.
    pub fn key(self) -> char {
        match self {
            Platform::Apple => '1',
            Platform::Spotify => '2',
            Platform::YouTube => '3',
        }
    }

    pub fn from_key(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == c)
    }
}

/// Build the href for `platform` on `track`.
pub fn href(track: &Track, platform: Platform) -> String {
    match platform {
        Platform::Apple => track.view_url.clone(),
        Platform::Spotify => format!(
            "https://open.spotify.com/search/{}",
            urlencoding::encode(&track.query())
        ),
        Platform::YouTube => format!(
            "https://music.youtube.com/search?q={}",
            urlencoding::encode(&track.query())
        ),
    }
}
