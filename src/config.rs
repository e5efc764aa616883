use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection parameters for the search endpoint.
///
/// Supplied when the REST client is constructed and replaceable as a whole
/// via [`RestSearchApi::reconfigure`](crate::harvest::RestSearchApi::reconfigure).
/// Timeouts are fixed per configuration, not adjustable per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the tracker, e.g. `https://tracker.example.com`.
    /// Trailing slashes are ignored.
    pub base_url: String,

    /// Basic-auth username.
    pub username: String,

    /// Basic-auth password or API token.
    pub password: String,

    /// Whether to verify the server's TLS certificate.
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Connection-establishment timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_verify_tls() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    5
}

impl SearchConfig {
    /// Creates a configuration with the default timeouts (30 s request,
    /// 5 s connect).
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        verify_tls: bool,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            verify_tls,
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }

    /// Base URL with any trailing slashes removed.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
