//! Transport port - authenticated GETs against the data provider.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the transport boundary.
#[derive(Debug, Error, Clone)]
pub enum TransportError {
    /// API key or secret missing at construction. Fatal: the core never
    /// attempts a request without validated credentials.
    #[error("API key or secret not configured")]
    MissingCredentials,

    /// The provider rejected the credentials (401/403).
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Connection-level failure (DNS, TLS, timeout, closed socket).
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response other than an authentication failure.
    #[error("HTTP status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body text, possibly empty.
        body: String,
    },
}

/// Performs one authenticated HTTP GET and returns the raw response text.
///
/// URLs are absolute and fully assembled by the endpoint builder before a
/// request is issued; implementations attach credentials and nothing else.
/// No retry - a failure surfaces to the caller as-is.
#[async_trait]
pub trait DataTransport: Send + Sync {
    /// Fetch `url` and return the response body. An empty body is returned
    /// as an empty string, not an error.
    async fn get_text(&self, url: &str) -> Result<String, TransportError>;
}
