//! Intersection-driven lazy loading for images and iframes.

use storefront_core::{attrs, NodeId, Page};
use tracing::debug;

/// Tracks a set of elements against the viewport with a vertical margin.
#[derive(Debug)]
pub struct IntersectionTracker {
    margin_px: f64,
    observed: Vec<NodeId>,
}

impl IntersectionTracker {
    /// Create a tracker with the given vertical root margin.
    pub fn new(margin_px: f64) -> Self {
        Self {
            margin_px,
            observed: Vec::new(),
        }
    }

    /// Start observing an element.
    pub fn observe(&mut self, id: NodeId) {
        if !self.observed.contains(&id) {
            self.observed.push(id);
        }
    }

    /// Stop observing an element.
    pub fn unobserve(&mut self, id: NodeId) {
        self.observed.retain(|o| *o != id);
    }

    /// Number of elements under observation.
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Drop all observations.
    pub fn clear(&mut self) {
        self.observed.clear();
    }

    /// Remove and return the observed elements currently intersecting the
    /// page viewport (expanded by the margin). Elements no longer in the
    /// page are dropped silently.
    pub fn take_intersecting(&mut self, page: &Page) -> Vec<NodeId> {
        let viewport = page.viewport();
        let mut hits = Vec::new();
        self.observed.retain(|id| match page.rect(*id) {
            Some(rect) => {
                if viewport.intersects_with_margin(&rect, self.margin_px) {
                    hits.push(*id);
                    false
                } else {
                    true
                }
            }
            None => false,
        });
        hits
    }
}

/// Lazy loader for `img[data-src]` and `iframe[data-src]`.
#[derive(Debug)]
pub struct LazyLoader {
    images: IntersectionTracker,
    iframes: IntersectionTracker,
}

impl LazyLoader {
    /// Create a loader with per-kind margins.
    pub fn new(image_margin_px: f64, iframe_margin_px: f64) -> Self {
        Self {
            images: IntersectionTracker::new(image_margin_px),
            iframes: IntersectionTracker::new(iframe_margin_px),
        }
    }

    /// Observe every deferred image and iframe currently in the page.
    pub fn scan(&mut self, page: &Page) {
        for id in page.elements_matching("img", attrs::DATA_SRC) {
            self.images.observe(id);
        }
        for id in page.elements_matching("iframe", attrs::DATA_SRC) {
            self.iframes.observe(id);
        }
        debug!(
            images = self.images.observed_count(),
            iframes = self.iframes.observed_count(),
            "observing deferred elements"
        );
    }

    /// Resolve every observed element intersecting the margined viewport,
    /// unobserving each as it resolves. Returns the number resolved.
    pub fn check(&mut self, page: &mut Page) -> usize {
        let mut resolved = 0;
        for id in self.images.take_intersecting(page) {
            if resolve(page, id) {
                resolved += 1;
            }
        }
        for id in self.iframes.take_intersecting(page) {
            if resolve(page, id) {
                resolved += 1;
            }
        }
        resolved
    }

    /// Eager fallback: resolve every deferred image immediately, bypassing
    /// intersection. Iframes have no fallback path and stay deferred.
    pub fn resolve_all_images(page: &mut Page) -> usize {
        let mut resolved = 0;
        for id in page.elements_matching("img", attrs::DATA_SRC) {
            if resolve(page, id) {
                resolved += 1;
            }
        }
        resolved
    }

    /// Elements still under observation.
    pub fn observed_count(&self) -> usize {
        self.images.observed_count() + self.iframes.observed_count()
    }

    /// Drop all observations.
    pub fn clear(&mut self) {
        self.images.clear();
        self.iframes.clear();
    }
}

/// Swap the deferred source into `src` and drop the deferred attribute.
fn resolve(page: &mut Page, id: NodeId) -> bool {
    match page.remove_attr(id, attrs::DATA_SRC) {
        Some(src) => {
            page.set_attr(id, "src", src);
            true
        }
        None => false,
    }
}
