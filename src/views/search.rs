//! Debounced search input for the public event list.

use std::time::Duration;

use tokio::time::Instant;

/// Holds the latest value until `wait` has passed without a newer one.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Replace any pending value and restart the timer from `now`.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.wait, value));
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    /// The pending value, if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        let due = matches!(&self.pending, Some((deadline, _)) if *deadline <= now);
        if due {
            self.pending.take().map(|(_, v)| v)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Search field state: what is typed, what the list is filtered by, and
/// whether the clear control is shown.
#[derive(Debug, Clone)]
pub struct SearchBox {
    input: String,
    applied: String,
    debouncer: Debouncer<String>,
    focused: bool,
}

impl SearchBox {
    pub fn new(debounce: Duration) -> Self {
        Self {
            input: String::new(),
            applied: String::new(),
            debouncer: Debouncer::new(debounce),
            focused: false,
        }
    }

    /// A keystroke. The filter is not applied until the debounce window passes.
    pub fn input(&mut self, text: &str, now: Instant) {
        self.input = text.to_string();
        self.focused = true;
        self.debouncer.push(self.input.clone(), now);
    }

    /// Apply the pending query if due; returns the newly applied query.
    pub fn take_due(&mut self, now: Instant) -> Option<&str> {
        let query = self.debouncer.take_due(now)?;
        self.applied = query;
        Some(&self.applied)
    }

    /// Sleep out the debounce window and apply the pending query, if any.
    pub async fn settle(&mut self) -> Option<&str> {
        let deadline = self.debouncer.deadline()?;
        tokio::time::sleep_until(deadline).await;
        self.take_due(Instant::now())
    }

    /// The clear control: empties the field, applies the empty filter
    /// immediately, and puts focus back on the input.
    pub fn clear(&mut self) {
        self.input.clear();
        self.applied.clear();
        self.debouncer.cancel();
        self.focused = true;
    }

    pub fn text(&self) -> &str {
        &self.input
    }

    pub fn applied(&self) -> &str {
        &self.applied
    }

    pub fn clear_visible(&self) -> bool {
        !self.input.is_empty()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn has_pending(&self) -> bool {
        self.debouncer.deadline().is_some()
    }
}
