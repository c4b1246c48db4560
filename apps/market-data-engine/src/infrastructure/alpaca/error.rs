//! Alpaca client error types.

use thiserror::Error;

use crate::application::ports::TransportError;

/// Errors from deserializing a provider response body.
///
/// These are explicit failures, distinct from the tolerant-empty cases where
/// an expected-but-optional root field is simply missing (those yield empty
/// results, never an error).
#[derive(Debug, Error, Clone)]
pub enum ParseError {
    /// The body is not valid JSON.
    #[error("malformed JSON response: {0}")]
    Json(String),

    /// The body is JSON but the expected shape cannot be constructed, e.g. a
    /// root key exists with a mismatched type.
    #[error("unexpected response shape: {0}")]
    Schema(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => Self::Schema(err.to_string()),
            _ => Self::Json(err.to_string()),
        }
    }
}

/// Errors from the market-data client operations.
#[derive(Debug, Error)]
pub enum MarketDataError {
    /// The transport failed or the provider returned a non-2xx status.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The pagination walk exceeded the defensive page cap, which usually
    /// means a non-terminating cursor from the provider.
    #[error("pagination exceeded {pages} pages without terminating")]
    PageLimitExceeded {
        /// Number of pages fetched before giving up.
        pages: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_json_classifies_as_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(ParseError::from(err), ParseError::Json(_)));
    }

    #[test]
    fn type_mismatch_classifies_as_schema_error() {
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct Expect {
            bars: u32,
        }
        let err = serde_json::from_str::<Expect>(r#"{"bars": "nope"}"#).unwrap_err();
        assert!(matches!(ParseError::from(err), ParseError::Schema(_)));
    }
}
