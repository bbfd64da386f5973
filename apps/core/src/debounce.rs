use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingQuery {
    text: String,
    deadline: Instant,
}

/// Trailing-edge debouncer: every schedule replaces the pending query, so
/// only the last text before a quiet window can fire.
#[derive(Debug)]
pub struct QueryDebouncer {
    window: Duration,
    pending: Option<PendingQuery>,
}

impl QueryDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn schedule(&mut self, text: &str, now: Instant) {
        self.pending = Some(PendingQuery {
            text: text.to_string(),
            deadline: now + self.window,
        });
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let due = matches!(&self.pending, Some(pending) if now >= pending.deadline);
        if !due {
            return None;
        }

        self.pending.take().map(|pending| pending.text)
    }
}
