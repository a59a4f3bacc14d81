use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending {
    value: String,
    due_at: Instant,
}

/// Holds back a rapidly changing value until it has been quiet for `delay`.
///
/// Every `update` replaces the pending value and restarts the full delay;
/// there are no trailing partial delays. The clock is passed in explicitly,
/// so the event loop decides when time advances and tests never sleep.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<Pending>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Records the latest value and restarts the quiet-period timer.
    pub fn update(&mut self, value: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            value: value.into(),
            due_at: now + self.delay,
        });
    }

    /// Emits the pending value once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let due = self.pending.as_ref().is_some_and(|p| p.due_at <= now);
        if !due {
            return None;
        }
        self.pending.take().map(|p| p.value)
    }

    /// Drops any pending emission. Nothing fires after this until the next
    /// `update`.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Next due time, for sizing the event-loop poll timeout.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due_at)
    }
}
