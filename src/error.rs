use thiserror::Error;

use crate::types::MetricFamily;

#[derive(Debug, Error)]
pub enum MarketDataError {
    /// Credential missing from the environment or rejected by the service.
    #[error("authentication error: {0}")]
    Authentication(String),

    /// Connection, DNS, or timeout failure — the service was never reached.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered, but not with the shape we expect.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Identifier not present in a catalog or response body.
    #[error("parcl_id {parcl_id} not found")]
    NotFound { parcl_id: u64 },

    /// The catalog contains more than one entry for the same id. Ids are
    /// unique by upstream contract, so this is a data-integrity failure,
    /// not something to resolve by taking the first match.
    #[error("parcl_id {parcl_id} appears {count} times in the catalog")]
    AmbiguousId { parcl_id: u64, count: usize },

    /// Well-formed response with zero points. Callers decide whether this
    /// is fatal for their use case.
    #[error("empty {metric} series for parcl_id {parcl_id}")]
    EmptySeries { parcl_id: u64, metric: MetricFamily },
}

pub type Result<T> = std::result::Result<T, MarketDataError>;

impl From<reqwest::Error> for MarketDataError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            MarketDataError::UnexpectedResponse(format!("body was not valid JSON: {e}"))
        } else {
            MarketDataError::Transport(e)
        }
    }
}
