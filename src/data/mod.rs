//! Data acquisition: source traits, provider clients, caching, catalogs.
//!
//! Every provider sits behind a small trait so the pipeline can be driven
//! by a deterministic fake (`sample`) in tests instead of live network
//! calls. The cache layer wraps a source from the outside; providers and
//! the pipeline know nothing about it.

pub mod cache;
pub mod catalog;
pub mod equity;
pub mod fred;
pub mod sample;
pub mod treasury;

pub use cache::{CacheMode, CachedTableSource};
pub use equity::EquityClient;
pub use fred::FredClient;
pub use sample::SampleSource;
pub use treasury::TreasuryClient;

use chrono::NaiveDate;

use crate::domain::{NamedSeries, RawTable, Year};
use crate::error::DataError;

/// A provider of period-keyed semi-structured tables (the treasury site).
pub trait TableSource: Send + Sync {
    /// Short identifier used in failure reports and cache keys.
    fn name(&self) -> &str;

    /// Fetch the table for one period.
    ///
    /// A failure here is isolated to the period: batch callers collect it
    /// and keep going (see `pipeline::fetch_year_tables`). Implementations
    /// must not mutate shared state beyond the network call itself.
    fn fetch_period_table(&self, period: Year) -> Result<RawTable, DataError>;
}

/// A provider of already-typed, date-indexed numeric series (FRED series,
/// equity closing prices).
pub trait SeriesSource: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch one series by its provider-specific key (series code or
    /// ticker symbol), labeled `label` in the result. `start` bounds the
    /// range where the provider supports it.
    fn fetch_series(
        &self,
        key: &str,
        label: &str,
        start: Option<NaiveDate>,
    ) -> Result<NamedSeries, DataError>;
}
