use reqwest::StatusCode;

/// Why a search did not produce a result list.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error! status: {0}")]
    Status(StatusCode),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SearchError {
    /// Dialog shown to the user for any search failure.
    pub const TITLE: &'static str = "Search Failed";
    pub const MESSAGE: &'static str =
        "Could not fetch music data. Please check your connection and try again.";
}
