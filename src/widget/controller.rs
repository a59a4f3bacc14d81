use crate::widget::candidate::Candidate;
use crate::widget::lookup::{LookupCompletion, LookupExecutor, LookupSource};
use std::sync::Arc;
use tracing::{debug, warn};

/// What the user sees when a lookup fails. The real error only goes to the
/// log.
pub const LOOKUP_ERROR_MESSAGE: &str = "Failed to fetch suggestions. Please try again.";

/// Lifecycle of the current lookup cycle. One tagged state, so loading,
/// error and results can never be set at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Loading,
    Failed,
    /// Lookup succeeded with no candidates.
    Empty,
    /// Lookup succeeded with at least one candidate.
    Ready,
}

/// Outcome of draining completions, for the widget to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupUpdate {
    Results { nonempty: bool },
    Failed,
}

/// Owns the lookup lifecycle: gates queries on `min_chars`, dispatches
/// fetches with a monotonically increasing sequence number, and applies only
/// the most recently dispatched query's outcome. A slow stale response can
/// never overwrite a fresher one.
pub struct SuggestionController {
    source: Arc<dyn LookupSource>,
    executor: LookupExecutor,
    min_chars: usize,
    latest_seq: u64,
    state: LookupState,
    candidates: Vec<Candidate>,
}

impl SuggestionController {
    pub fn new(source: Arc<dyn LookupSource>, min_chars: usize) -> Self {
        Self {
            source,
            executor: LookupExecutor::new(),
            min_chars,
            latest_seq: 0,
            state: LookupState::Idle,
            candidates: Vec::new(),
        }
    }

    pub fn state(&self) -> LookupState {
        self.state
    }

    pub fn set_min_chars(&mut self, min_chars: usize) {
        self.min_chars = min_chars;
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Marks everything still in flight as stale without touching the
    /// current results. Used when a commit makes the pending query moot.
    pub fn invalidate(&mut self) {
        self.latest_seq += 1;
        if self.state == LookupState::Loading {
            self.state = LookupState::Idle;
        }
    }

    /// Reacts to a settled (debounced) query. Short queries clear the list
    /// and dispatch nothing; anything else starts a fetch. Returns whether a
    /// fetch was dispatched.
    pub fn on_debounced_query(&mut self, query: &str) -> bool {
        if query.is_empty() || query.chars().count() < self.min_chars {
            debug!(query, min_chars = self.min_chars, "query below minimum, clearing");
            self.candidates.clear();
            self.state = LookupState::Idle;
            // Anything still in flight is now stale.
            self.latest_seq += 1;
            return false;
        }

        self.latest_seq += 1;
        self.state = LookupState::Loading;
        debug!(seq = self.latest_seq, query, "dispatching lookup");
        self.executor
            .spawn(Arc::clone(&self.source), query.to_string(), self.latest_seq);
        true
    }

    /// Drains finished lookups and applies the latest one, if any.
    pub fn poll(&mut self) -> Option<LookupUpdate> {
        let mut update = None;
        for completion in self.executor.drain_ready() {
            if let Some(applied) = self.apply(completion) {
                update = Some(applied);
            }
        }
        update
    }

    fn apply(&mut self, completion: LookupCompletion) -> Option<LookupUpdate> {
        if completion.seq != self.latest_seq {
            warn!(
                seq = completion.seq,
                latest = self.latest_seq,
                query = %completion.query,
                "discarding stale lookup completion"
            );
            return None;
        }

        match completion.result {
            Ok(candidates) => {
                let nonempty = !candidates.is_empty();
                debug!(
                    seq = completion.seq,
                    count = candidates.len(),
                    "applying lookup results"
                );
                self.candidates = candidates;
                self.state = if nonempty {
                    LookupState::Ready
                } else {
                    LookupState::Empty
                };
                Some(LookupUpdate::Results { nonempty })
            }
            Err(_) => {
                self.candidates.clear();
                self.state = LookupState::Failed;
                Some(LookupUpdate::Failed)
            }
        }
    }
}
