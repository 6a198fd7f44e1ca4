//! Form submission guard.

use std::collections::HashSet;

use storefront_core::{attrs, NodeId, Page};

/// Label shown on the submit control while a submission is in flight.
pub const BUSY_LABEL: &str = "Processing...";

/// Locks out the submit control of guarded forms on submission.
///
/// There is no re-enable path: the control stays disabled until the page
/// is replaced, matching the storefront behavior this runtime preserves.
#[derive(Debug, Default)]
pub struct SubmitGuard {
    guarded: HashSet<NodeId>,
}

impl SubmitGuard {
    /// Create an empty guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every `form[data-optimized]` currently in the page.
    pub fn scan(&mut self, page: &Page) {
        self.guarded = page
            .elements_matching("form", attrs::DATA_OPTIMIZED)
            .into_iter()
            .collect();
    }

    /// Number of guarded forms.
    pub fn guarded_count(&self) -> usize {
        self.guarded.len()
    }

    /// Handle a submit: disable the form's first submit control and set the
    /// busy label. Returns true when a control was locked.
    pub fn on_submit(&self, page: &mut Page, form: NodeId) -> bool {
        if !self.guarded.contains(&form) {
            return false;
        }
        let submit = page
            .descendants(form)
            .into_iter()
            .find(|id| page.attr(*id, "type") == Some("submit"));
        match submit {
            Some(button) => {
                page.set_attr(button, "disabled", "");
                page.set_text(button, BUSY_LABEL);
                true
            }
            None => false,
        }
    }

    /// Drop all registrations.
    pub fn clear(&mut self) {
        self.guarded.clear();
    }
}
