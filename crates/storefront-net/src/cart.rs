//! Cart API client.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FetchError;
use crate::form::encode_form;
use crate::transport::HttpTransport;

/// Path of the add-to-cart endpoint.
pub const CART_ADD_PATH: &str = "/cart/add.js";
/// Path of the cart state endpoint.
pub const CART_STATE_PATH: &str = "/cart.js";

/// Current cart state as returned by `GET /cart.js`.
///
/// Only `item_count` is interpreted; the rest of the payload is carried
/// opaquely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    /// Total item count (sum of line quantities).
    pub item_count: i64,
    /// Remaining payload fields, uninterpreted.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Client for the cart endpoints.
pub struct CartClient<T> {
    transport: Arc<T>,
    base_url: String,
}

impl<T: HttpTransport> CartClient<T> {
    /// Create a client; endpoint paths are joined onto `base_url`.
    pub fn new(transport: Arc<T>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    /// POST serialized form fields to the add-to-cart endpoint.
    ///
    /// The response body is decoded as JSON but consumed opaquely; HTTP
    /// success is the success signal.
    pub async fn add(
        &self,
        fields: &[(String, String)],
    ) -> Result<serde_json::Value, FetchError> {
        let url = format!("{}{}", self.base_url, CART_ADD_PATH);
        let body = encode_form(fields);
        debug!(url = %url, fields = fields.len(), "posting add-to-cart");
        let bytes = self.transport.post_form(&url, body).await?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Deserialization(e.to_string()))
    }

    /// Fetch the current cart state.
    pub async fn summary(&self) -> Result<CartSummary, FetchError> {
        let url = format!("{}{}", self.base_url, CART_STATE_PATH);
        let bytes = self.transport.get(&url).await?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Deserialization(e.to_string()))
    }
}
