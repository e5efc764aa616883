//! Search endpoint seam.
//!
//! [`SearchApi`] abstracts one paged search request so the harvester can be
//! exercised against a mock endpoint in tests and against the REST client in
//! production.

use crate::model::Page;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from a single search request.
///
/// The taxonomy keeps the three failure classes apart so callers can log
/// precisely which one occurred: the request never completed, the server
/// rejected it, or the body was not the expected shape.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The HTTP client itself could not be constructed.
    #[error("HTTP client could not be constructed: {0}")]
    Client(#[source] reqwest::Error),

    /// Network or protocol failure before a response body was available.
    #[error("search request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("search endpoint returned HTTP {status}")]
    Status { status: reqwest::StatusCode },

    /// The response body could not be parsed as a search result.
    #[error("malformed search response: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// One paged request against the search endpoint.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a harvester can be shared across
/// tasks.
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Requests `max_results` issues matching `query` starting at offset
    /// `start_at`. A `max_results` of 0 asks for metadata only (used for
    /// query validation).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] on transport failure, non-2xx status, or a
    /// body that does not parse as a search result.
    async fn search(&self, query: &str, start_at: u64, max_results: u64)
        -> Result<Page, SearchError>;
}
