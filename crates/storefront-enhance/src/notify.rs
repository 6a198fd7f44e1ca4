//! Transient notifications.

use std::time::{Duration, Instant};

use storefront_core::{Element, NodeId, Page};
use tracing::debug;

/// Notification severity, reflected in the element's class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Success (the default).
    #[default]
    Success,
    /// Informational.
    Info,
    /// Error.
    Error,
}

impl Severity {
    /// Class-name suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Error => "error",
        }
    }
}

/// Creates timed, auto-dismissing notification elements.
///
/// No queueing or dedup: concurrent notifications stack independently,
/// each with its own expiry.
#[derive(Debug)]
pub struct NotificationCenter {
    ttl: Duration,
    live: Vec<(NodeId, Instant)>,
}

impl NotificationCenter {
    /// Create a center with the given notification lifetime.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            live: Vec::new(),
        }
    }

    /// Append a notification element to the page.
    pub fn notify(
        &mut self,
        page: &mut Page,
        message: &str,
        severity: Severity,
        now: Instant,
    ) -> NodeId {
        let class = format!("notification notification--{}", severity.as_str());
        let id = page.append(Element::new("div").with_attr("class", class).with_text(message));
        self.live.push((id, now + self.ttl));
        debug!(message, severity = severity.as_str(), "notification shown");
        id
    }

    /// Remove expired notification elements. Returns how many were removed.
    pub fn sweep(&mut self, page: &mut Page, now: Instant) -> usize {
        let mut removed = 0;
        self.live.retain(|(id, expires)| {
            if now >= *expires {
                page.remove(*id);
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    /// Notifications currently alive.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Teardown: remove every live notification immediately.
    pub fn clear(&mut self, page: &mut Page) {
        for (id, _) in self.live.drain(..) {
            page.remove(id);
        }
    }
}
