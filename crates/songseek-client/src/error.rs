//! Fetch error types for the search client.

use thiserror::Error;

/// Errors that can occur while fetching a search payload.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint answered with a non-success HTTP status.
    #[error("HTTP error from {source_name}: {message}")]
    Http {
        source_name: String,
        message: String,
    },

    /// The envelope's `meta.status` reported a failure.
    #[error("{source_name} reported status {status}")]
    UpstreamStatus { source_name: String, status: u16 },

    /// The response body could not be decoded as a search payload.
    #[error("parse error from {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// An error propagated from `reqwest` (DNS, connect, timeout, ...).
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}

impl FetchError {
    /// Returns `true` when the error is transient and the request may
    /// succeed if issued again.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::Http { .. } => true,
            Self::UpstreamStatus { status, .. } => *status >= 500,
            Self::Parse { .. } => false,
        }
    }

    /// Returns `true` when the upstream answered but rejected or garbled
    /// the request.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::UpstreamStatus { .. } | Self::Parse { .. }
        )
    }
}

/// Convenience alias for fetch results.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
