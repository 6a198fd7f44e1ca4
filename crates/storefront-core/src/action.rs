//! Event routing and tagged action dispatch types.

use crate::geometry::Viewport;
use crate::ids::ProductId;
use crate::page::NodeId;

/// Enhancement actions produced by the click delegator.
///
/// Dispatch is keyed by variant rather than by ad-hoc attribute checks;
/// a single click may produce several actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open the quick-view modal for a product.
    QuickView(ProductId),
    /// Submit the enclosing form through the cart API.
    AddToCart {
        /// The form to serialize and post.
        form: NodeId,
    },
}

/// Page events routed through the enhancer.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// A click on an element.
    Click {
        /// Click target.
        target: NodeId,
    },
    /// Text input on an element.
    Input {
        /// Input target.
        target: NodeId,
        /// Current field value.
        value: String,
    },
    /// The document scrolled.
    Scroll {
        /// New vertical scroll offset.
        scroll_top: f64,
    },
    /// An animation frame fired.
    Frame,
    /// The window resized.
    Resize {
        /// New viewport dimensions.
        viewport: Viewport,
    },
    /// A form was submitted.
    Submit {
        /// The submitted form.
        form: NodeId,
    },
}
