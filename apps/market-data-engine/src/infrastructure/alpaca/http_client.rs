//! HTTP transport adapter for the Alpaca APIs.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::application::ports::{DataTransport, TransportError};

use super::config::{AlpacaConfig, Credentials};

/// Authenticated HTTP GET client for Alpaca endpoints.
///
/// Construction fails fast when credentials are missing - no request is ever
/// attempted unauthenticated. One request per call, no retry: transport
/// failures surface to the caller as-is.
#[derive(Debug, Clone)]
pub struct AlpacaHttpClient {
    client: Client,
    credentials: Credentials,
}

impl AlpacaHttpClient {
    /// Create a new HTTP client from config.
    pub fn new(config: &AlpacaConfig) -> Result<Self, TransportError> {
        if config.credentials.is_incomplete() {
            return Err(TransportError::MissingCredentials);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            client,
            credentials: config.credentials.clone(),
        })
    }
}

#[async_trait]
impl DataTransport for AlpacaHttpClient {
    async fn get_text(&self, url: &str) -> Result<String, TransportError> {
        let response = self
            .client
            .get(url)
            .header("APCA-API-KEY-ID", self.credentials.api_key())
            .header("APCA-API-SECRET-KEY", self.credentials.api_secret())
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!(%url, status = status.as_u16(), "GET");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(TransportError::AuthenticationFailed);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::infrastructure::alpaca::config::AlpacaEnvironment;

    #[test]
    fn construction_fails_without_credentials() {
        let config = AlpacaConfig::new(
            Credentials::new(String::new(), "secret".to_string()),
            AlpacaEnvironment::Paper,
        );
        assert!(matches!(
            AlpacaHttpClient::new(&config),
            Err(TransportError::MissingCredentials)
        ));
    }

    #[test]
    fn construction_succeeds_with_credentials() {
        let config = AlpacaConfig::new(
            Credentials::new("key".to_string(), "secret".to_string()),
            AlpacaEnvironment::Paper,
        );
        assert!(AlpacaHttpClient::new(&config).is_ok());
    }
}
