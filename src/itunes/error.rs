//! Failure taxonomy shared by every store operation.

use std::fmt;
use thiserror::Error;

/// Upstream endpoint a request was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    TopPodcasts,
    Search,
    Lookup,
    CustomerReviews,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::TopPodcasts => "toppodcasts",
            Endpoint::Search => "search",
            Endpoint::Lookup => "lookup",
            Endpoint::CustomerReviews => "customerreviews",
        };
        write!(f, "{}", name)
    }
}

/// Errors raised by [`Store`](crate::itunes::Store) operations. None are retried internally.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The upstream could not be reached or the call timed out.
    #[error("transport error: {0}")]
    Transport(String),

    /// The upstream answered with a non-200 status; `body` is the raw response body.
    #[error("itunes {endpoint} api error ({status}): {body}")]
    Upstream { endpoint: Endpoint, status: u16, body: String },

    /// The payload did not have the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A lookup did not return exactly one result.
    #[error("invalid lookup result length: {0}, expected 1")]
    InvalidResultCount(usize),
}
