//! Delegated click dispatch.
//!
//! A single click entry point routes to enhancement actions through a
//! dispatch table keyed by action kind. Rules are evaluated independently:
//! an element carrying both trigger attributes produces both actions.

use storefront_core::{attrs, Action, NodeId, Page, ProductId};
use tracing::debug;

/// The action kinds the delegator dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Quick-view modal trigger.
    QuickView,
    /// Add-to-cart trigger.
    AddToCart,
}

impl ActionKind {
    /// The dispatch table, in evaluation order.
    pub const ALL: [ActionKind; 2] = [ActionKind::QuickView, ActionKind::AddToCart];

    /// The attribute that triggers this action.
    pub fn trigger_attr(&self) -> &'static str {
        match self {
            ActionKind::QuickView => attrs::DATA_QUICK_VIEW,
            ActionKind::AddToCart => attrs::DATA_ADD_TO_CART,
        }
    }
}

/// Result of routing a click.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickOutcome {
    /// Actions to run, in dispatch-table order.
    pub actions: Vec<Action>,
    /// Whether the click's default behavior is suppressed. Any matched
    /// trigger suppresses it, even when the action itself is dropped.
    pub default_prevented: bool,
}

/// Route a click on `target` to enhancement actions.
pub fn dispatch_click(page: &Page, target: NodeId) -> ClickOutcome {
    let mut actions = Vec::new();
    let mut default_prevented = false;

    for kind in ActionKind::ALL {
        if !page.has_attr(target, kind.trigger_attr()) {
            continue;
        }
        default_prevented = true;
        match kind {
            ActionKind::QuickView => {
                let product_id = page.attr(target, attrs::DATA_PRODUCT_ID).unwrap_or_default();
                actions.push(Action::QuickView(ProductId::new(product_id)));
            }
            ActionKind::AddToCart => match page.closest(target, "form") {
                Some(form) => actions.push(Action::AddToCart { form }),
                None => {
                    debug!(node = target.index(), "add-to-cart trigger outside a form");
                }
            },
        }
    }

    ClickOutcome {
        actions,
        default_prevented,
    }
}
