//! Background thread that runs searches off the UI thread.
//!
//! Every search carries a ticket id. The worker only issues a request for
//! the most recently submitted ticket, so a burst of searches collapses into
//! one request, and every outcome is tagged with its id so the controller
//! can drop answers that arrive after a newer search started.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Sender};
use std::thread;

use super::client::SearchBackend;
use super::error::SearchError;
use super::model::Track;

/// One requested search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub id: u64,
    pub term: String,
}

/// A settled search, successful or not.
#[derive(Debug)]
pub struct SearchOutcome {
    pub id: u64,
    pub term: String,
    pub result: Result<Vec<Track>, SearchError>,
}

pub struct SearchWorker {
    tx: Sender<SearchTicket>,
    latest: Arc<AtomicU64>,
}

impl SearchWorker {
    /// Spawn the worker thread. Outcomes are delivered on `outcomes`.
    pub fn spawn(backend: Box<dyn SearchBackend>, outcomes: Sender<SearchOutcome>) -> Self {
        let (tx, rx) = mpsc::channel::<SearchTicket>();
        let latest = Arc::new(AtomicU64::new(0));

        let latest_for_thread = latest.clone();
        thread::spawn(move || {
            for ticket in rx {
                if ticket.id != latest_for_thread.load(Ordering::Acquire) {
                    log::debug!("skipping superseded search #{} ({:?})", ticket.id, ticket.term);
                    continue;
                }

                let result = backend.search(&ticket.term);
                let outcome = SearchOutcome {
                    id: ticket.id,
                    term: ticket.term,
                    result,
                };
                if outcomes.send(outcome).is_err() {
                    break;
                }
            }
            log::debug!("search worker exiting");
        });

        Self { tx, latest }
    }

    /// Queue `ticket`, superseding every ticket submitted before it.
    pub fn submit(&self, ticket: SearchTicket) -> Result<(), mpsc::SendError<SearchTicket>> {
        self.latest.store(ticket.id, Ordering::Release);
        self.tx.send(ticket)
    }

    /// Id of the most recently submitted ticket.
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }
}
