//! Tracking the state of dump requests.
//!
//! Every request gets a [`Ticket`]. Only the ticket of the most recent
//! request can resolve the state, and only once, so a slow response to an
//! earlier request can never replace the content of a newer one.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{LoadError, SourceError};
use crate::response::{Loaded, decode_response};
use crate::source::DocumentSource;

/// State of the most recent request.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Pending,
    Error(LoadError),
    Ready(Loaded),
}

impl LoadState {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub fn ready(&self) -> Option<&Loaded> {
        match self {
            Self::Ready(loaded) => Some(loaded),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }

    fn from_result(result: Result<Value, SourceError>) -> Self {
        match result.map_err(LoadError::from).and_then(decode_response) {
            Ok(loaded) => Self::Ready(loaded),
            Err(error) => Self::Error(error),
        }
    }
}

/// Identifies one request made through a [`LoadTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    generation: u64,
}

impl Ticket {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// State machine behind [`Loader`], usable without threads.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadTracker {
    generation: u64,
    path: Option<String>,
    state: LoadState,
}

impl Default for LoadTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation: 0,
            path: None,
            state: LoadState::Pending,
        }
    }

    /// Starts a new request, superseding any earlier one.
    pub fn begin(&mut self, path: &str) -> Ticket {
        self.generation += 1;
        self.path = Some(path.to_string());
        self.state = LoadState::Pending;
        debug!(path, generation = self.generation, "load started");
        Ticket {
            generation: self.generation,
        }
    }

    /// Applies a response. Returns `false` when the response is stale and
    /// was discarded.
    pub fn resolve(&mut self, ticket: Ticket, result: Result<Value, SourceError>) -> bool {
        self.settle(ticket, LoadState::from_result(result))
    }

    fn settle(&mut self, ticket: Ticket, state: LoadState) -> bool {
        if ticket.generation != self.generation || !self.state.is_pending() {
            debug!(
                generation = ticket.generation,
                current = self.generation,
                "discarding stale response"
            );
            return false;
        }
        self.state = state;
        debug!(
            generation = ticket.generation,
            ready = self.state.ready().is_some(),
            "load resolved"
        );
        true
    }

    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Path of the most recent request.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Ticket of the most recent request, if any was made.
    #[must_use]
    pub fn current(&self) -> Option<Ticket> {
        (self.generation > 0).then_some(Ticket {
            generation: self.generation,
        })
    }
}

type Response = (Ticket, Result<Value, SourceError>);

/// Runs fetches on background threads and keeps the latest state.
///
/// Each request gets its own channel and the worker holds its only sender.
/// Superseded fetches are not interrupted; their responses go nowhere.
pub struct Loader<S> {
    source: Arc<S>,
    tracker: LoadTracker,
    receiver: Option<Receiver<Response>>,
}

impl<S> Loader<S>
where
    S: DocumentSource + Send + Sync + 'static,
{
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            tracker: LoadTracker::new(),
            receiver: None,
        }
    }

    /// Requests `path` in the background.
    pub fn load(&mut self, path: &str) -> Ticket {
        let ticket = self.tracker.begin(path);
        let source = Arc::clone(&self.source);
        let (sender, receiver) = mpsc::channel::<Response>();
        self.receiver = Some(receiver);
        let path = path.to_string();
        thread::spawn(move || {
            let result = source.fetch(&path);
            // The request may have been superseded already.
            let _ = sender.send((ticket, result));
        });
        ticket
    }

    /// Requests the most recent path again.
    pub fn reload(&mut self) -> Option<Ticket> {
        let path = self.tracker.path()?.to_string();
        Some(self.load(&path))
    }

    /// Applies the response if it has arrived, without blocking.
    pub fn poll(&mut self) -> &LoadState {
        let response = match self.receiver.as_ref().map(Receiver::try_recv) {
            None | Some(Err(TryRecvError::Empty)) => return self.tracker.state(),
            Some(Ok(response)) => Some(response),
            Some(Err(TryRecvError::Disconnected)) => None,
        };
        self.finish(response);
        self.tracker.state()
    }

    /// Blocks until the most recent request has resolved.
    ///
    /// A worker that stops without answering, for example by panicking,
    /// resolves the request to [`LoadError::NoResponse`].
    pub fn wait(&mut self) -> &LoadState {
        if let Some(receiver) = self.receiver.take() {
            self.finish(receiver.recv().ok());
        }
        self.tracker.state()
    }

    fn finish(&mut self, response: Option<Response>) {
        self.receiver = None;
        if let Some((ticket, result)) = response {
            self.tracker.resolve(ticket, result);
            return;
        }
        let Some(ticket) = self.tracker.current() else {
            return;
        };
        let path = self.tracker.path().unwrap_or_default().to_string();
        warn!(%path, "background fetch ended without a response");
        self.tracker
            .settle(ticket, LoadState::Error(LoadError::NoResponse { path }));
    }

    #[must_use]
    pub fn state(&self) -> &LoadState {
        self.tracker.state()
    }

    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.tracker.path()
    }
}

/// Fetches `path` once on the current thread.
pub fn fetch_state<S: DocumentSource + ?Sized>(source: &S, path: &str) -> LoadState {
    let mut tracker = LoadTracker::new();
    let ticket = tracker.begin(path);
    tracker.resolve(ticket, source.fetch(path));
    tracker.state
}
