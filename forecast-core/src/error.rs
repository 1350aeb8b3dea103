use reqwest::StatusCode;
use thiserror::Error;

/// Failures inside the HTTP client adapter.
///
/// These never leave [`crate::http::HttpClient::request`]; callers only see
/// `None`. The variants exist so the log line says what went wrong.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS, TLS or body read failure.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("upstream returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Strips the request URL (which carries the API key) before wrapping.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}
