//! REST implementation of the search seam.

use crate::config::SearchConfig;
use crate::harvest::api::{SearchApi, SearchError};
use crate::model::{Issue, Page};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;
use std::sync::RwLock;

/// Wire shape of a search response body.
///
/// `total` and `issues` are both mandatory; a body missing either is
/// reported as [`SearchError::Malformed`].
#[derive(Debug, Deserialize)]
struct SearchResponse {
    issues: Vec<Issue>,
    total: u64,
}

struct RestState {
    http: reqwest::Client,
    config: SearchConfig,
}

impl RestState {
    fn build(config: SearchConfig) -> Result<Self, SearchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(SearchError::Client)?;

        Ok(Self { http, config })
    }
}

/// Search client backed by the tracker's REST search resource.
///
/// Connection parameters come from [`SearchConfig`] at construction and can
/// be swapped atomically with [`reconfigure`](Self::reconfigure); calls
/// already in flight keep the client they started with.
pub struct RestSearchApi {
    state: RwLock<RestState>,
}

impl RestSearchApi {
    /// Builds the client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Client`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        Ok(Self {
            state: RwLock::new(RestState::build(config)?),
        })
    }

    /// Replaces endpoint, credentials, TLS flag and timeouts for all
    /// subsequent calls.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Client`] if the replacement client cannot be
    /// constructed; the previous configuration stays active in that case.
    pub fn reconfigure(&self, config: SearchConfig) -> Result<(), SearchError> {
        let next = RestState::build(config)?;
        let mut guard = self
            .state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = next;
        Ok(())
    }
}

#[async_trait]
impl SearchApi for RestSearchApi {
    async fn search(
        &self,
        query: &str,
        start_at: u64,
        max_results: u64,
    ) -> Result<Page, SearchError> {
        // Snapshot the client and credentials; the guard must not be held
        // across an await point.
        let (http, url, username, password) = {
            let guard = self
                .state
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            (
                guard.http.clone(),
                format!("{}/rest/api/2/search", guard.config.normalized_base_url()),
                guard.config.username.clone(),
                guard.config.password.clone(),
            )
        };

        let response = http
            .get(url)
            .basic_auth(&username, Some(&password))
            .query(&[
                ("jql", query.to_string()),
                ("startAt", start_at.to_string()),
                ("maxResults", max_results.to_string()),
            ])
            .send()
            .await
            .map_err(SearchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status { status });
        }

        let body = response.text().await.map_err(SearchError::Transport)?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(SearchError::Malformed)?;

        Ok(Page {
            issues: parsed.issues,
            start_at,
            max_results,
            total: parsed.total,
        })
    }
}
