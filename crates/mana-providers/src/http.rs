//! HTTP seam between adapters and the network
//!
//! Adapters only see [`HttpClient`]; production code plugs in
//! [`ReqwestClient`], tests plug in a mock.

use crate::error::FetchError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimal async GET client
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Fetch a URL and return its body as text
    ///
    /// # Errors
    /// - `FetchError::NotFound` for HTTP 404
    /// - `FetchError::Status` for any other non-success status
    /// - `FetchError::Timeout` / `FetchError::Transport` for network failures
    async fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetch a URL, mapping 404 to `None`
///
/// # Errors
/// Any [`FetchError`] other than `NotFound`
pub async fn get_optional(client: &dyn HttpClient, url: &str) -> Result<Option<String>, FetchError> {
    match client.get_text(url).await {
        Ok(body) => Ok(Some(body)),
        Err(err) if err.is_not_found() => {
            tracing::debug!("No upstream data at {}", url);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User agent sent upstream
    pub user_agent: String,
    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl HttpConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With user agent
    #[inline]
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Request timeout as a duration
    #[inline]
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("mana/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_ms: 8_000,
        }
    }
}

/// [`HttpClient`] backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Build client from configuration
    ///
    /// # Errors
    /// - `FetchError::Client` if the TLS backend cannot be initialized
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        let inner = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { inner })
    }
}

fn transport_error(url: &str, err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        tracing::trace!("GET {}", url);

        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(url, &e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| transport_error(url, &e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_optional_maps_not_found_to_none() {
        let mut client = MockHttpClient::new();
        client.expect_get_text().returning(|url| {
            Err(FetchError::NotFound {
                url: url.to_string(),
            })
        });

        let body = get_optional(&client, "https://example.test/missing").await;
        assert_eq!(body, Ok(None));
    }

    #[tokio::test]
    async fn get_optional_propagates_other_errors() {
        let mut client = MockHttpClient::new();
        client.expect_get_text().returning(|url| {
            Err(FetchError::Status {
                url: url.to_string(),
                status: 500,
            })
        });

        let body = get_optional(&client, "https://example.test/broken").await;
        assert!(matches!(body, Err(FetchError::Status { status: 500, .. })));
    }

    #[test]
    fn http_config_builder() {
        let config = HttpConfig::new()
            .with_user_agent("tests")
            .with_request_timeout(Duration::from_secs(2));
        assert_eq!(config.user_agent, "tests");
        assert_eq!(config.request_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn reqwest_client_builds() {
        assert!(ReqwestClient::new(&HttpConfig::default()).is_ok());
    }
}
