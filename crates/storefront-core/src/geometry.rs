//! Geometry for viewport intersection checks.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Create a new rect.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A zero-sized rect at the origin.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether this rect overlaps `other` (edge-touching counts).
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    /// Return this rect expanded by `margin` pixels above and below.
    ///
    /// Horizontal edges are left in place, matching a root margin of
    /// `"<margin>px 0px"`.
    pub fn with_vertical_margin(&self, margin: f64) -> Rect {
        Rect {
            x: self.x,
            y: self.y - margin,
            width: self.width,
            height: self.height + 2.0 * margin,
        }
    }
}

/// The visible portion of the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Vertical scroll offset.
    pub scroll_top: f64,
    /// Visible width.
    pub width: f64,
    /// Visible height.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport at the top of the document.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scroll_top: 0.0,
            width,
            height,
        }
    }

    /// The viewport as a rect in document coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_top, self.width, self.height)
    }

    /// Whether `target` intersects the viewport expanded vertically by
    /// `margin` pixels.
    pub fn intersects_with_margin(&self, target: &Rect, margin: f64) -> bool {
        self.rect().with_vertical_margin(margin).intersects(target)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}
