//! Error types for rate lookups

use thiserror::Error;

/// Why a request to a rate endpoint did not produce a response body.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchFailure {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Transport(String),
}

/// Errors raised by a [`RateClient`](crate::core::RateClient).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Fetch failed for {url}: {cause}")]
    FetchFailed {
        url: String,
        #[source]
        cause: FetchFailure,
    },

    #[error("Failed to parse response from {url}: {reason}")]
    ParseFailed { url: String, reason: String },
}

impl ClientError {
    /// True when the server answered with a non-success status, as opposed to a
    /// transport problem or an undecodable body.
    pub fn is_status(&self) -> bool {
        matches!(
            self,
            ClientError::FetchFailed {
                cause: FetchFailure::Status(_),
                ..
            }
        )
    }
}

/// The error surfaced by [`ConversionPipeline`](crate::core::ConversionPipeline).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RateUnavailable {
    #[error("Rate unavailable for {operation} ({pair}): {source}")]
    Client {
        operation: &'static str,
        pair: String,
        #[source]
        source: ClientError,
    },

    #[error("Rate unavailable: no {target} rate in {base} rates")]
    MissingRate { base: String, target: String },
}

impl RateUnavailable {
    pub(crate) fn wrap(operation: &'static str, pair: String) -> impl FnOnce(ClientError) -> Self {
        move |source| RateUnavailable::Client {
            operation,
            pair,
            source,
        }
    }
}
