//! Rofex adapter errors.

use thiserror::Error;

use crate::ports::{AccountError, GatewayError, MarketDataError};

/// Authentication failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The API rejected the credentials.
    #[error("authentication rejected (HTTP {status})")]
    Rejected {
        /// HTTP status returned by the token endpoint.
        status: u16,
    },
    /// The token response carried no `X-Auth-Token` header.
    #[error("auth response missing X-Auth-Token header")]
    MissingToken,
    /// Network failure.
    #[error("auth transport error: {0}")]
    Transport(String),
}

/// Errors from the Rofex adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RofexError {
    /// Authentication failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// The API returned a non-success status.
    #[error("API error (HTTP {status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },
    /// Network failure.
    #[error("transport error: {0}")]
    Transport(String),
    /// The response body could not be parsed.
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl From<RofexError> for MarketDataError {
    fn from(err: RofexError) -> Self {
        match err {
            RofexError::Auth(e) => Self::Auth(e.to_string()),
            other => Self::Transport(other.to_string()),
        }
    }
}

impl From<RofexError> for AccountError {
    fn from(err: RofexError) -> Self {
        match err {
            RofexError::Auth(e) => Self::Auth(e.to_string()),
            RofexError::JsonParse(msg) => Self::Malformed(msg),
            other => Self::Transport(other.to_string()),
        }
    }
}

impl From<RofexError> for GatewayError {
    fn from(err: RofexError) -> Self {
        match err {
            RofexError::Auth(e) => Self::Auth(e.to_string()),
            other => Self::Transport(other.to_string()),
        }
    }
}
