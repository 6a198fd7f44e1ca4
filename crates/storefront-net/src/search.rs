//! Search-suggest API client.

use std::sync::Arc;

use tracing::debug;
use url::form_urlencoded;

use crate::error::FetchError;
use crate::transport::HttpTransport;

/// Path of the suggest endpoint.
pub const SUGGEST_PATH: &str = "/search/suggest.json";

/// Build the suggest URL with the query escaped.
pub fn suggest_url(base_url: &str, query: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("{}{}?q={}", base_url, SUGGEST_PATH, encoded)
}

/// Client for the suggest endpoint.
///
/// Responses are not sequence-guarded: a stale in-flight request can
/// complete after a newer one, matching the page script this replaces.
pub struct SuggestClient<T> {
    transport: Arc<T>,
    base_url: String,
}

impl<T: HttpTransport> SuggestClient<T> {
    /// Create a client; the suggest path is joined onto `base_url`.
    pub fn new(transport: Arc<T>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    /// GET suggestions for a query. The payload shape is unspecified and
    /// returned opaquely.
    pub async fn suggest(&self, query: &str) -> Result<serde_json::Value, FetchError> {
        let url = suggest_url(&self.base_url, query);
        debug!(url = %url, "fetching suggestions");
        let bytes = self.transport.get(&url).await?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Deserialization(e.to_string()))
    }
}
