//! Error types for metadata fact gathering.

use thiserror::Error;

/// Errors that can occur when talking to the metadata service.
///
/// These surface from client construction and the strict fetch path only.
/// [`FactGatherer::gather`](crate::FactGatherer::gather) absorbs every fetch
/// failure into "fact absent" and never returns an error.
#[derive(Debug, Error)]
pub enum FactsError {
    /// HTTP error with status code.
    #[error("http {0}")]
    Http(u16),

    /// HTTP request error (connection failure, timeout, invalid URL).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}
