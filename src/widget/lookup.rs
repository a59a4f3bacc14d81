use crate::widget::candidate::Candidate;
use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// The externally supplied lookup: takes a query, returns an ordered
/// candidate list. Opaque to the widget; may be slow, may fail.
pub trait LookupSource: Send + Sync {
    fn fetch(&self, query: &str) -> Result<Vec<Candidate>, LookupError>;
}

impl<F> LookupSource for F
where
    F: Fn(&str) -> Result<Vec<Candidate>, LookupError> + Send + Sync,
{
    fn fetch(&self, query: &str) -> Result<Vec<Candidate>, LookupError> {
        self(query)
    }
}

/// The one failure mode of the lookup boundary. The message is for the log;
/// users only ever see a generic notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupError {
    message: String,
}

impl LookupError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lookup failed: {}", self.message)
    }
}

impl std::error::Error for LookupError {}

#[derive(Debug, Clone)]
pub struct LookupCompletion {
    pub seq: u64,
    pub query: String,
    pub result: Result<Vec<Candidate>, LookupError>,
}

/// Runs each fetch on its own worker thread and hands completions back over
/// a channel, so typing never waits on an in-flight lookup. Completions are
/// tagged with the dispatch sequence number; the controller keeps only the
/// latest.
pub struct LookupExecutor {
    completion_tx: Sender<LookupCompletion>,
    completion_rx: Receiver<LookupCompletion>,
}

impl LookupExecutor {
    pub fn new() -> Self {
        let (completion_tx, completion_rx) = mpsc::channel::<LookupCompletion>();
        Self {
            completion_tx,
            completion_rx,
        }
    }

    pub fn spawn(&self, source: Arc<dyn LookupSource>, query: String, seq: u64) {
        let completion_tx = self.completion_tx.clone();
        std::thread::spawn(move || {
            let result = source.fetch(&query);
            if let Err(err) = &result {
                tracing::warn!(seq, query = %query, error = %err, "lookup failed");
            }
            // Receiver gone means the widget was dropped; nothing to deliver.
            let _ = completion_tx.send(LookupCompletion { seq, query, result });
        });
    }

    pub fn drain_ready(&self) -> Vec<LookupCompletion> {
        let mut out = Vec::<LookupCompletion>::new();
        loop {
            match self.completion_rx.try_recv() {
                Ok(completion) => out.push(completion),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }
}

impl Default for LookupExecutor {
    fn default() -> Self {
        Self::new()
    }
}
