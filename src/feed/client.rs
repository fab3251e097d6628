//! HTTP access behind a small capability trait so fetching can be mocked
//! in tests.

use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
    #[error("malformed GeoJSON: {0}")]
    Parse(String),
}

/// GET one document body. One outstanding request per document; no
/// retries, no caching.
pub trait FeedClient: Send + Sync {
    fn get(&self, url: &str) -> Result<Vec<u8>, FeedError>;
}

/// Real client backed by reqwest.
pub struct HttpFeedClient {
    client: reqwest::blocking::Client,
}

impl HttpFeedClient {
    pub fn new() -> Result<Self, FeedError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| FeedError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl FeedClient for HttpFeedClient {
    fn get(&self, url: &str) -> Result<Vec<u8>, FeedError> {
        let response = self.client.get(url).send().map_err(|e| {
            warn!(url, error = %e, "request failed");
            FeedError::Http(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "non-success response");
            return Err(FeedError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .map_err(|e| FeedError::Http(format!("failed to read response: {e}")))?;
        debug!(url, bytes = body.len(), "document fetched");
        Ok(body.to_vec())
    }
}

/// Canned-response client for tests.
#[cfg(test)]
pub struct MockFeedClient {
    pub response: Result<Vec<u8>, FeedError>,
}

#[cfg(test)]
impl FeedClient for MockFeedClient {
    fn get(&self, _url: &str) -> Result<Vec<u8>, FeedError> {
        self.response.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_success() {
        let mock = MockFeedClient {
            response: Ok(b"{}".to_vec()),
        };
        assert_eq!(mock.get("http://example.com").unwrap(), b"{}".to_vec());
    }

    #[test]
    fn test_mock_error_propagates() {
        let mock = MockFeedClient {
            response: Err(FeedError::Status {
                status: 503,
                url: "http://example.com".to_string(),
            }),
        };
        let err = mock.get("http://example.com").unwrap_err();
        assert_eq!(err.to_string(), "HTTP 503 from http://example.com");
    }
}
