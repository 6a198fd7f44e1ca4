//! Web-vitals sample collection.
//!
//! Mirrors the two entry types the storefront watches: largest contentful
//! paint and first input. Samples are logged as they arrive and kept for
//! later inspection.

use std::time::Duration;

use tracing::info;

/// A performance timeline entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VitalsEntry {
    /// Largest contentful paint; `start` is the paint time.
    LargestContentfulPaint {
        /// Time from navigation start to the paint.
        start: Duration,
    },
    /// First input; delay is `processing_start - start`.
    FirstInput {
        /// Time from navigation start to the input.
        start: Duration,
        /// Time from navigation start to handler dispatch.
        processing_start: Duration,
    },
}

/// Collects web-vitals entries for the page.
#[derive(Debug, Default)]
pub struct VitalsObserver {
    lcp: Option<Duration>,
    first_input_delay: Option<Duration>,
}

impl VitalsObserver {
    /// Create an empty observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a timeline entry, logging the derived metric.
    pub fn record(&mut self, entry: VitalsEntry) {
        match entry {
            VitalsEntry::LargestContentfulPaint { start } => {
                info!(lcp_ms = start.as_millis() as u64, "LCP");
                self.lcp = Some(start);
            }
            VitalsEntry::FirstInput {
                start,
                processing_start,
            } => {
                let delay = processing_start.saturating_sub(start);
                info!(fid_ms = delay.as_millis() as u64, "FID");
                self.first_input_delay = Some(delay);
            }
        }
    }

    /// Latest largest-contentful-paint time.
    pub fn lcp(&self) -> Option<Duration> {
        self.lcp
    }

    /// Latest first-input delay.
    pub fn first_input_delay(&self) -> Option<Duration> {
        self.first_input_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lcp_recorded() {
        let mut vitals = VitalsObserver::new();
        vitals.record(VitalsEntry::LargestContentfulPaint {
            start: Duration::from_millis(1200),
        });
        assert_eq!(vitals.lcp(), Some(Duration::from_millis(1200)));
    }

    #[test]
    fn test_fid_is_processing_delay() {
        let mut vitals = VitalsObserver::new();
        vitals.record(VitalsEntry::FirstInput {
            start: Duration::from_millis(500),
            processing_start: Duration::from_millis(530),
        });
        assert_eq!(vitals.first_input_delay(), Some(Duration::from_millis(30)));
    }
}
