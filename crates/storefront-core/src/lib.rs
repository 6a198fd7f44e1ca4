//! Core abstractions for the storefront enhancement runtime.
//!
//! This crate provides the fundamental types:
//! - `Page` / `NodeId` - in-memory element arena the enhancers mutate
//! - `Rect` / `Viewport` - geometry for intersection checks
//! - `Action` / `PageEvent` - tagged dispatch and event routing types
//! - `EnhanceConfig` - runtime configuration
//! - `VitalsObserver` - web-vitals sample collection

mod action;
mod config;
mod error;
mod geometry;
mod ids;
mod page;
mod vitals;

pub use action::*;
pub use config::*;
pub use error::*;
pub use geometry::*;
pub use ids::*;
pub use page::*;
pub use vitals::*;
