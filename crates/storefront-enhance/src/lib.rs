//! Storefront page enhancement components.
//!
//! This crate provides the enhancement runtime:
//!
//! - **Lazy loading**: intersection-driven `data-src` resolution for images
//!   and iframes, with an eager fallback
//! - **Event delegation**: clicks dispatched to quick-view and add-to-cart
//!   actions through a tagged dispatch table
//! - **Cart flow**: form post, cart-count refresh, success notification
//! - **Search**: debounced suggest requests
//! - **Throttling**: frame-aligned scroll coalescing and resize debounce
//! - **Form guard**: submit-button lockout during submission
//!
//! Everything is wired by `Enhancer`, a component instance with explicit
//! `start`/`stop` replacing page-lifetime globals.

pub mod delegate;
pub mod engine;
pub mod error;
pub mod guard;
pub mod lazy;
pub mod notify;
pub mod search;
pub mod throttle;

pub use engine::{Enhancer, EventOutcome};
pub use error::EnhanceError;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::delegate::{dispatch_click, ActionKind, ClickOutcome};
    pub use crate::engine::{Enhancer, EventOutcome};
    pub use crate::error::EnhanceError;
    pub use crate::guard::SubmitGuard;
    pub use crate::lazy::{IntersectionTracker, LazyLoader};
    pub use crate::notify::{NotificationCenter, Severity};
    pub use crate::search::SearchBox;
    pub use crate::throttle::{Debouncer, FrameThrottle};

    pub use storefront_core::{
        attrs, Action, Element, EnhanceConfig, NodeId, Page, PageEvent, ProductId, Rect,
        Viewport, VitalsEntry, VitalsObserver,
    };
    pub use storefront_net::{
        CartClient, CartSummary, FetchError, HttpTransport, ReqwestTransport, SuggestClient,
    };
}
