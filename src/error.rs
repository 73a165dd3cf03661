//! Library error types.
//!
//! Two levels of failure exist in the pipeline:
//!
//! - `DataError`: a single acquisition or structural parse failure
//! - `FetchFailure`: one failed item inside a batch, reported alongside
//!   the successful items instead of aborting the batch
//!
//! Empty results (empty canonical table, empty aligned table) are valid
//! values, not errors; undefined statistics surface as the missing
//! sentinel in derived series (see `domain`).

use thiserror::Error;

/// Errors surfaced by data acquisition and normalization.
#[derive(Debug, Clone, Error)]
pub enum DataError {
    /// Network or provider failure for one period/series/ticker.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The response arrived but did not have the expected structure.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A required credential is missing from the environment.
    #[error("missing credential: {0}")]
    MissingCredential(String),
}

/// A failed item in a batch fetch.
///
/// `item` is the period, series code, or ticker that failed; the rest of
/// the batch is unaffected.
#[derive(Debug, Clone)]
pub struct FetchFailure {
    pub source: String,
    pub item: String,
    pub error: DataError,
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}: {}", self.source, self.item, self.error)
    }
}
