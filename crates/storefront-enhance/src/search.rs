//! Debounced search input.

use std::time::{Duration, Instant};

use storefront_core::NodeId;

use crate::throttle::Debouncer;

/// Debounces input on the search field into suggest queries.
///
/// Rapid edits inside the quiet window collapse to one query carrying the
/// final text. Queries shorter than the minimum clear any pending timer and
/// schedule nothing. Responses are deliberately not sequence-guarded (see
/// the suggest client).
#[derive(Debug)]
pub struct SearchBox {
    input: NodeId,
    min_chars: usize,
    debounce: Debouncer,
    pending: Option<String>,
}

impl SearchBox {
    /// Create a search box bound to the given input element.
    pub fn new(input: NodeId, min_chars: usize, window: Duration) -> Self {
        Self {
            input,
            min_chars,
            debounce: Debouncer::new(window),
            pending: None,
        }
    }

    /// The bound input element.
    pub fn input_node(&self) -> NodeId {
        self.input
    }

    /// Record an input event with the field's current value.
    pub fn on_input(&mut self, value: &str, now: Instant) {
        let query = value.trim();
        if query.chars().count() < self.min_chars {
            self.debounce.cancel();
            self.pending = None;
            return;
        }
        self.pending = Some(query.to_string());
        self.debounce.trigger(now);
    }

    /// Take the query once the quiet window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if self.debounce.fire(now) {
            self.pending.take()
        } else {
            None
        }
    }

}
