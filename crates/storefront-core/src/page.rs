//! In-memory page model.
//!
//! The enhancers operate on a minimal element arena rather than a live DOM:
//! elements carry a tag name, an attribute map, text content, a parent link
//! and a bounding rect. All mutation goes through `&mut Page`, which is the
//! single-threaded stand-in for the browser's shared DOM.

use std::collections::HashMap;

use crate::error::PageError;
use crate::geometry::{Rect, Viewport};

/// Data attributes making up the enhancement contract.
pub mod attrs {
    /// Deferred resource URL, swapped into `src` on visibility.
    pub const DATA_SRC: &str = "data-src";
    /// Quick-view trigger.
    pub const DATA_QUICK_VIEW: &str = "data-quick-view";
    /// Product identifier on quick-view triggers.
    pub const DATA_PRODUCT_ID: &str = "data-product-id";
    /// Add-to-cart trigger.
    pub const DATA_ADD_TO_CART: &str = "data-add-to-cart";
    /// Cart count display.
    pub const DATA_CART_COUNT: &str = "data-cart-count";
    /// Search suggest input.
    pub const DATA_SEARCH_INPUT: &str = "data-search-input";
    /// Search suggest results container.
    pub const DATA_SEARCH_RESULTS: &str = "data-search-results";
    /// Forms with submission guarding.
    pub const DATA_OPTIMIZED: &str = "data-optimized";
}

/// Handle to an element in a `Page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Raw arena index.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// An element in the page arena.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    attrs: HashMap<String, String>,
    text: String,
    rect: Rect,
}

impl Element {
    /// Create an element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: HashMap::new(),
            text: String::new(),
            rect: Rect::zero(),
        }
    }

    /// Set an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the bounding rect.
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }
}

#[derive(Debug)]
struct Node {
    element: Element,
    parent: Option<NodeId>,
}

/// The element arena plus the current viewport.
///
/// Removal leaves a tombstone so `NodeId`s stay stable; lookups on removed
/// nodes return `None` rather than panicking.
#[derive(Debug, Default)]
pub struct Page {
    nodes: Vec<Option<Node>>,
    viewport: Viewport,
}

impl Page {
    /// Create an empty page with the default viewport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty page with an explicit viewport.
    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            nodes: Vec::new(),
            viewport,
        }
    }

    /// Append a root-level element.
    pub fn append(&mut self, element: Element) -> NodeId {
        self.insert(element, None)
    }

    /// Append an element under `parent`.
    pub fn append_to(&mut self, parent: NodeId, element: Element) -> NodeId {
        self.insert(element, Some(parent))
    }

    fn insert(&mut self, element: Element, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node { element, parent }));
        id
    }

    /// Remove an element (and orphan its descendants).
    pub fn remove(&mut self, id: NodeId) -> bool {
        match self.nodes.get_mut(id.0) {
            Some(slot @ Some(_)) => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Whether `id` refers to a live element.
    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id.0), Some(Some(_)))
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(|n| n.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(|n| n.as_mut())
    }

    /// Tag name of an element.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.element.tag.as_str())
    }

    /// Get an attribute value.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)
            .and_then(|n| n.element.attrs.get(name))
            .map(|s| s.as_str())
    }

    /// Whether the element carries an attribute (any value).
    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.node(id)
            .map(|n| n.element.attrs.contains_key(name))
            .unwrap_or(false)
    }

    /// Set an attribute value.
    pub fn set_attr(&mut self, id: NodeId, name: impl Into<String>, value: impl Into<String>) {
        if let Some(n) = self.node_mut(id) {
            n.element.attrs.insert(name.into(), value.into());
        }
    }

    /// Remove an attribute, returning its prior value.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.node_mut(id).and_then(|n| n.element.attrs.remove(name))
    }

    /// Text content of an element.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.element.text.as_str())
    }

    /// Replace the text content.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(n) = self.node_mut(id) {
            n.element.text = text.into();
        }
    }

    /// Bounding rect of an element.
    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.node(id).map(|n| n.element.rect)
    }

    /// Parent of an element.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Update the vertical scroll position.
    pub fn set_scroll_top(&mut self, scroll_top: f64) {
        self.viewport.scroll_top = scroll_top;
    }

    /// Replace the viewport (e.g. after a resize).
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn live_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|_| NodeId(i)))
    }

    /// All live elements carrying `attr`, in document order.
    pub fn elements_with_attr(&self, attr: &str) -> Vec<NodeId> {
        self.live_ids()
            .filter(|id| self.has_attr(*id, attr))
            .collect()
    }

    /// Live elements with tag `tag` carrying `attr`, in document order.
    pub fn elements_matching(&self, tag: &str, attr: &str) -> Vec<NodeId> {
        self.live_ids()
            .filter(|id| self.tag(*id) == Some(tag) && self.has_attr(*id, attr))
            .collect()
    }

    /// First live element carrying `attr`.
    pub fn first_with_attr(&self, attr: &str) -> Option<NodeId> {
        self.live_ids().find(|id| self.has_attr(*id, attr))
    }

    /// Nearest ancestor (including `id` itself) with tag `tag`.
    pub fn closest(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.tag(node) == Some(tag) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// All live descendants of `root`, in document order.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        self.live_ids()
            .filter(|id| *id != root && self.has_ancestor(*id, root))
            .collect()
    }

    fn has_ancestor(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Name/value pairs of the named field elements under `form`.
    ///
    /// A field is any descendant with a `name` attribute; its value is the
    /// `value` attribute, empty when absent.
    pub fn form_fields(&self, form: NodeId) -> Result<Vec<(String, String)>, PageError> {
        if !self.contains(form) {
            return Err(PageError::NodeMissing(form.index()));
        }
        if self.tag(form) != Some("form") {
            return Err(PageError::NotAForm(form.index()));
        }
        Ok(self
            .descendants(form)
            .into_iter()
            .filter_map(|id| {
                let name = self.attr(id, "name")?.to_string();
                let value = self.attr(id, "value").unwrap_or_default().to_string();
                Some((name, value))
            })
            .collect())
    }
}
