//! Error types for providers
//!
//! Two layers:
//! - [`FetchError`] for the HTTP seam (status, transport, timeout)
//! - [`ProviderError`] for a capability call as seen by the aggregator
//!
//! Malformed upstream payloads are absorbed inside the adapters, so
//! [`ProviderError::Malformed`] never crosses the provider boundary.

use mana_schema::Capability;

/// Errors from a single upstream request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Upstream has no page for this champion/position
    #[error("not found: {url}")]
    NotFound { url: String },

    /// Non-success HTTP status other than 404
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Request timed out
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// Connection or body read failure
    #[error("transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// HTTP client could not be built
    #[error("http client error: {0}")]
    Client(String),
}

impl FetchError {
    /// Check if upstream simply has no data
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if a later attempt could succeed
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Transport { .. } => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::NotFound { .. } | Self::Client(_) => false,
        }
    }
}

/// Errors from a provider capability call
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// Capability not declared by this provider
    #[error("{provider} does not support {capability}")]
    Unsupported {
        provider: String,
        capability: Capability,
    },

    /// Upstream request failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Upstream payload did not have the expected shape
    #[error("malformed {what} from {provider}: {message}")]
    Malformed {
        provider: &'static str,
        what: &'static str,
        message: String,
    },

    /// No provider registered under this id
    #[error("unknown provider: '{0}'")]
    UnknownProvider(String),
}

impl ProviderError {
    /// Check if retrying the call later could succeed
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Fetch(err) if err.is_transient())
    }

    /// Create malformed payload error
    pub fn malformed(provider: &'static str, what: &'static str, message: impl Into<String>) -> Self {
        Self::Malformed {
            provider,
            what,
            message: message.into(),
        }
    }
}
