//! # Rate Fetcher
//!
//! Issues the single GET of a load cycle and hands back the raw body.
//! There is no retry: one attempt per cycle.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::error::Error as _;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Reasons the rate endpoint could not be read
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("server responded with HTTP {0}")]
    Status(u16),
}

/// Source of raw rate-table bodies
///
/// The returned future must be `Send` because the loader runs it on a
/// background tokio task.
pub trait RateFetcher: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Production fetcher backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpRateFetcher {
    client: reqwest::Client,
}

impl HttpRateFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        tracing::debug!("Creating HTTP client with timeout {:?}", timeout);
        let client = reqwest::Client::builder()
            .user_agent(concat!("fxline/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(format!("unable to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    fn map_error(url: &str, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else if let Some(status) = error.status() {
            FetchError::Status(status.as_u16())
        } else {
            // Show full error chain so connection causes are not lost
            let mut message = error.to_string();
            let mut source = error.source();
            while let Some(cause) = source {
                message.push_str(&format!(": {cause}"));
                source = cause.source();
            }
            FetchError::Network(message)
        }
    }
}

impl RateFetcher for HttpRateFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let start_time = std::time::Instant::now();
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::map_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Rate endpoint returned {}", status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Self::map_error(url, e))?;

        tracing::info!(
            "Fetched {} bytes in {}ms",
            body.len(),
            start_time.elapsed().as_millis()
        );
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_should_describe_status() {
        assert_eq!(
            FetchError::Status(503).to_string(),
            "server responded with HTTP 503"
        );
    }

    #[test]
    fn fetch_error_should_describe_timeout() {
        let error = FetchError::Timeout {
            url: "https://example.com/latest".into(),
        };
        assert!(error.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn unreachable_host_should_fail_with_network_error() {
        let fetcher = HttpRateFetcher::new(Duration::from_secs(2)).unwrap();
        // Port 9 on loopback (discard) is closed on CI hosts
        let result = fetcher.fetch("http://127.0.0.1:9/latest?base=GBP").await;
        assert!(matches!(
            result,
            Err(FetchError::Network(_)) | Err(FetchError::Timeout { .. })
        ));
    }
}
