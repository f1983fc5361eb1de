//! HTTP client wrapper for metadata requests.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::error::FactsError;

/// Default timeout for metadata requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default metadata service base URL (link-local address).
pub const DEFAULT_BASE_URL: &str = "http://169.254.169.254";

/// HTTP client wrapper for metadata service requests.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    inner: Client,
    base_url: String,
}

impl MetadataClient {
    /// Create a new metadata client with the specified timeout and base URL.
    pub fn new(timeout: Duration, base_url: &str) -> Result<Self, FactsError> {
        let inner = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(false)
            .build()?;
        Ok(Self {
            inner,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a new metadata client with the default timeout and base URL.
    pub fn with_default_timeout() -> Result<Self, FactsError> {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_BASE_URL)
    }

    /// Create a new metadata client with a custom base URL (for testing).
    pub fn with_base_url(base_url: &str) -> Result<Self, FactsError> {
        Self::new(DEFAULT_TIMEOUT, base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch `uri` and return the response body as text.
    ///
    /// # Errors
    ///
    /// Returns `FactsError::Http` for non-2xx responses and
    /// `FactsError::Request` for transport failures.
    pub async fn get_text(&self, uri: &str) -> Result<String, FactsError> {
        let response = self.inner.get(uri).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FactsError::Http(status.as_u16()));
        }

        response.text().await.map_err(FactsError::from)
    }

    /// Fetch `uri`, absorbing every failure.
    ///
    /// Any transport error, non-2xx status, or empty body yields `None`.
    /// The crawl treats all three uniformly as "field unavailable".
    pub async fn try_get_text(&self, uri: &str) -> Option<String> {
        match self.get_text(uri).await {
            Ok(body) if body.is_empty() => {
                debug!(uri, "empty metadata response");
                None
            }
            Ok(body) => Some(body),
            Err(err) => {
                debug!(uri, error = %err, "metadata fetch failed");
                None
            }
        }
    }
}

impl Default for MetadataClient {
    fn default() -> Self {
        Self::with_default_timeout().expect("failed to create HTTP client")
    }
}
