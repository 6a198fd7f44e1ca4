//! Network layer for the storefront enhancement runtime.
//!
//! Outbound calls go through the `HttpTransport` seam so the engine can be
//! exercised without a server; `ReqwestTransport` is the production
//! implementation.

mod cart;
mod error;
mod form;
mod search;
mod transport;

pub use cart::*;
pub use error::*;
pub use form::*;
pub use search::*;
pub use transport::*;
