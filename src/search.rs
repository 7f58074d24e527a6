//! Remote song catalog: track schema, HTTP backend, search worker and the
//! outbound links rendered on each card.

mod client;
mod error;
mod links;
mod model;
mod worker;

pub use client::{HttpSearch, SearchBackend, decode_results, search_url};
pub use error::SearchError;
pub use links::{Platform, href};
pub use model::{PLACEHOLDER_ARTWORK, Track};
pub use worker::{SearchOutcome, SearchTicket, SearchWorker};
