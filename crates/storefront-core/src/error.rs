//! Page model error types.

use thiserror::Error;

/// Errors from page model operations.
#[derive(Error, Debug)]
pub enum PageError {
    /// Node is not (or no longer) in the page.
    #[error("Node {0} is not in the page")]
    NodeMissing(usize),

    /// Expected a form element.
    #[error("Node {0} is not a form")]
    NotAForm(usize),
}
