//! Paged retrieval of complete result sets.

use crate::harvest::api::{SearchApi, SearchError};
use crate::model::ResultSet;
use thiserror::Error;
use tracing::{info, warn};

/// Fixed number of issues requested per page.
pub const PAGE_SIZE: u64 = 50;

/// Errors from a whole-result-set fetch.
#[derive(Error, Debug)]
pub enum HarvestError {
    /// A page request failed; carries the query and the offset at which the
    /// fetch aborted. No partial result set is returned.
    #[error("failed to fetch issues for query '{query}' at offset {start_at}: {source}")]
    Fetch {
        query: String,
        start_at: u64,
        #[source]
        source: SearchError,
    },
}

/// Retrieves every issue matching a query by sequential paged requests.
///
/// Pages are fetched strictly in ascending offset order — consumers rely on
/// first-seen field order for header discovery and on row order matching the
/// source, so no concurrent fetching is done.
pub struct Harvester<S> {
    api: S,
}

impl<S: SearchApi> Harvester<S> {
    pub fn new(api: S) -> Self {
        Self { api }
    }

    /// Fetches all issues matching `query`.
    ///
    /// The first request is always issued — it is how the total is learned —
    /// even when that total turns out to be 0. The loop then advances the
    /// offset by [`PAGE_SIZE`] until it reaches the total reported by the
    /// first page. There is no cap on the number of pages; the result set is
    /// as large as the server says it is.
    ///
    /// # Errors
    ///
    /// Any page failure aborts the whole fetch with [`HarvestError::Fetch`];
    /// nothing is retried and no partial result is returned.
    pub async fn fetch_all(&self, query: &str) -> Result<ResultSet, HarvestError> {
        let mut issues = Vec::new();
        let mut start_at: u64 = 0;
        let mut total: Option<u64> = None;

        loop {
            let page = self
                .api
                .search(query, start_at, PAGE_SIZE)
                .await
                .map_err(|source| {
                    warn!(query, start_at, error = %source, "failed to fetch page of issues");
                    HarvestError::Fetch {
                        query: query.to_string(),
                        start_at,
                        source,
                    }
                })?;

            // The total is captured from the first successful response and
            // never revised afterwards.
            if total.is_none() {
                total = Some(page.total);
            }

            info!(
                query,
                start_at,
                page_size = page.issues.len(),
                total = page.total,
                "fetched page of issues"
            );

            issues.extend(page.issues);
            start_at += PAGE_SIZE;

            if start_at >= total.unwrap_or(0) {
                break;
            }
        }

        Ok(ResultSet {
            issues,
            total: total.unwrap_or(0),
        })
    }

    /// Checks whether the endpoint accepts `query`, using a zero-record
    /// request.
    ///
    /// Unlike [`fetch_all`](Self::fetch_all), every failure is swallowed into
    /// `false`: a query that cannot be validated is simply not valid. Nothing
    /// is propagated to the caller.
    pub async fn validate(&self, query: &str) -> bool {
        match self.api.search(query, 0, 0).await {
            Ok(_) => true,
            Err(error) => {
                warn!(query, %error, "query validation failed");
                false
            }
        }
    }
}
