use serde::Deserialize;

/// Shown when a track's artwork URL is unusable.
pub const PLACEHOLDER_ARTWORK: &str = "https://placehold.co/400x400/1f2937/4b5563?text=Error";

/// The resolution segment the catalog embeds in every `artworkUrl100`.
const ARTWORK_SEGMENT: &str = "100x100bb";

/// One song returned by the catalog.
///
/// Every field is required: a result missing any of them fails the decode
/// of the whole response instead of producing a half-filled card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    #[serde(rename = "trackName")]
    pub title: String,
    #[serde(rename = "artistName")]
    pub artist: String,
    #[serde(rename = "artworkUrl100")]
    pub artwork_url: String,
    #[serde(rename = "trackViewUrl")]
    pub view_url: String,
    #[serde(rename = "previewUrl")]
    pub preview_url: String,
}

/// Body of a search response. `resultCount` is ignored; the array length
/// is authoritative. Entries stay raw so a schema mismatch can be reported
/// with its position.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub results: Vec<serde_json::Value>,
}

impl Track {
    /// Artwork URL at `resolution`x`resolution`, or the placeholder when the
    /// catalog handed back something that is not an http(s) URL.
    pub fn artwork(&self, resolution: u32) -> String {
        let url = self.artwork_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return PLACEHOLDER_ARTWORK.to_string();
        }
        url.replacen(
            ARTWORK_SEGMENT,
            &format!("{resolution}x{resolution}bb"),
            1,
        )
    }

    /// `"<title> <artist>"`, the query used for the other platforms.
    pub fn query(&self) -> String {
        format!("{} {}", self.title, self.artist)
    }
}
