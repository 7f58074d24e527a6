use reqwest::blocking::Client;

use super::types::PlaybackError;

/// Downloads preview clips. Previews are ~30s of AAC, small enough to hold
/// in memory, which also gives the decoder a seekable source.
pub(super) struct PreviewFetcher {
    client: Client,
}

impl PreviewFetcher {
    pub(super) fn new(user_agent: &str) -> Result<Self, PlaybackError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    pub(super) fn fetch(&self, preview_url: &str) -> Result<Vec<u8>, PlaybackError> {
        let response = self.client.get(preview_url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlaybackError::Status(status));
        }
        Ok(response.bytes()?.to_vec())
    }
}
