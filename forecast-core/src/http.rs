use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::FetchError;

/// GETs a fully-formed URL and decodes the JSON body.
///
/// Every failure collapses to `None`; there are no retries and no timeout
/// beyond the transport defaults.
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    http: Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    /// `endpoint` is a short label used in log lines instead of the URL.
    pub async fn request<T: DeserializeOwned>(&self, endpoint: &str, url: &str) -> Option<T> {
        match self.try_request(url).await {
            Ok(data) => Some(data),
            Err(err) => {
                tracing::error!(endpoint, error = %err, "weather request failed");
                None
            }
        }
    }

    async fn try_request<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let res = self.http.get(url).send().await.map_err(FetchError::transport)?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::transport)?;

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
