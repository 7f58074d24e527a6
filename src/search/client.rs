use reqwest::blocking::Client;

use crate::config::SearchSettings;

use super::error::SearchError;
use super::model::{SearchResponse, Track};

/// Anything that can turn a search term into a list of tracks.
///
/// The worker thread owns one of these; tests swap in fakes.
pub trait SearchBackend: Send {
    fn search(&self, term: &str) -> Result<Vec<Track>, SearchError>;
}

/// Build the catalog query for `term`.
pub fn search_url(endpoint: &str, term: &str, limit: u32) -> String {
    format!(
        "{}?term={}&entity=song&limit={}",
        endpoint,
        urlencoding::encode(term),
        limit
    )
}

/// Decode a response body into tracks, enforcing the `Track` schema.
pub fn decode_results(body: &[u8]) -> Result<Vec<Track>, SearchError> {
    let response: SearchResponse = serde_json::from_slice(body)?;
    response
        .results
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            serde_json::from_value::<Track>(raw).map_err(|e| {
                log::error!("search result #{index} does not match the track schema: {e}");
                SearchError::from(e)
            })
        })
        .collect()
}

/// Catalog backend talking HTTP with a blocking reqwest client.
pub struct HttpSearch {
    client: Client,
    endpoint: String,
    limit: u32,
}

impl HttpSearch {
    pub fn new(settings: &SearchSettings) -> Result<Self, SearchError> {
        // No request timeout: a slow search just keeps the loader up.
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(None)
            .build()?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            limit: settings.limit,
        })
    }
}

impl SearchBackend for HttpSearch {
    fn search(&self, term: &str) -> Result<Vec<Track>, SearchError> {
        let url = search_url(&self.endpoint, term, self.limit);
        log::info!("searching catalog: {url}");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        let body = response.bytes()?;
        let tracks = decode_results(&body)?;
        log::info!("search for {term:?} returned {} tracks", tracks.len());
        Ok(tracks)
    }
}
