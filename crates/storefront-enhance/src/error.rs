//! Enhancement error types.

use storefront_core::PageError;
use storefront_net::FetchError;
use thiserror::Error;

/// Errors from enhancement flows.
///
/// These never reach the user: the engine catches and logs them, since the
/// runtime enhances rather than gates page functionality.
#[derive(Error, Debug)]
pub enum EnhanceError {
    /// Page model error.
    #[error("Page error: {0}")]
    Page(#[from] PageError),

    /// Network error.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}
