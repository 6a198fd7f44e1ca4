//! HTTP transport seam.

use async_trait::async_trait;

use crate::error::FetchError;

/// Content type for form posts.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Transport abstraction for the API clients.
///
/// The engine is generic over this trait; tests substitute an in-memory
/// implementation and production uses `ReqwestTransport`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// GET a URL, returning the response body on HTTP success.
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;

    /// POST a form-encoded body, returning the response body on HTTP success.
    async fn post_form(&self, url: &str, body: String) -> Result<Vec<u8>, FetchError>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a fresh client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport over an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn read_ok(url: &str, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let status = response.status().as_u16();
        if status >= 400 {
            return Err(FetchError::Http {
                status,
                url: url.to_string(),
            });
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Connection(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Connection(e.to_string()))?;
        Self::read_ok(url, response).await
    }

    async fn post_form(&self, url: &str, body: String) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .post(url)
            .header("content-type", FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| FetchError::Connection(e.to_string()))?;
        Self::read_ok(url, response).await
    }
}
