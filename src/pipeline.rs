//! Shared pipeline logic: batch acquisition with per-item failure
//! isolation, then normalization.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch periods -> collect failures -> normalize -> canonical table.
//!
//! Front-ends (a dashboard shell, tests) drive these functions and own
//! presentation; nothing here renders, exports, or caches.

use chrono::NaiveDate;
use rayon::prelude::*;
use tracing::warn;

use crate::data::{SeriesSource, TableSource};
use crate::domain::{NamedSeries, RawTable, Year};
use crate::error::{DataError, FetchFailure};
use crate::normalize::{self, NormalizeOptions, NormalizeOutput};

/// Successfully fetched tables plus the per-period failures.
#[derive(Debug, Clone)]
pub struct TableBatch {
    pub tables: Vec<RawTable>,
    pub failures: Vec<FetchFailure>,
}

/// Fetch one table per period.
///
/// Periods are independent and read-only, so they run through a bounded
/// parallel pool; results come back in the caller's period order
/// regardless of completion order. One period failing never prevents the
/// others from succeeding.
pub fn fetch_year_tables<S: TableSource + ?Sized>(source: &S, periods: &[Year]) -> TableBatch {
    let results: Vec<Result<RawTable, FetchFailure>> = periods
        .par_iter()
        .map(|&period| {
            source.fetch_period_table(period).map_err(|error| {
                warn!(source = source.name(), period, %error, "period fetch failed");
                FetchFailure {
                    source: source.name().to_string(),
                    item: period.to_string(),
                    error,
                }
            })
        })
        .collect();

    let mut tables = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(table) => tables.push(table),
            Err(failure) => failures.push(failure),
        }
    }
    TableBatch { tables, failures }
}

/// Output of the fetch -> normalize pipeline for one table source.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub normalized: NormalizeOutput,
    pub failures: Vec<FetchFailure>,
}

/// Fetch the selected periods and normalize whatever arrived.
///
/// Per-period failures ride along in the output; only the normalizer's
/// structural errors abort. When every period fails, the empty fetch
/// result normalizes to an explicitly empty table the caller must check.
pub fn build_canonical_table<S: TableSource + ?Sized>(
    source: &S,
    periods: &[Year],
    options: &NormalizeOptions,
) -> Result<PipelineRun, DataError> {
    let batch = fetch_year_tables(source, periods);
    let normalized = normalize::normalize(&batch.tables, options)?;
    Ok(PipelineRun {
        normalized,
        failures: batch.failures,
    })
}

/// Successfully fetched series plus the per-item failures.
#[derive(Debug, Clone)]
pub struct SeriesBatch {
    pub series: Vec<NamedSeries>,
    pub failures: Vec<FetchFailure>,
}

/// Fetch a catalog of `(label, key)` series with per-item isolation.
///
/// Result order follows the catalog order for the items that succeeded.
pub fn fetch_catalog<S: SeriesSource + ?Sized>(
    source: &S,
    entries: &[(&str, &str)],
    start: Option<NaiveDate>,
) -> SeriesBatch {
    let results: Vec<Result<NamedSeries, FetchFailure>> = entries
        .par_iter()
        .map(|&(label, key)| {
            source.fetch_series(key, label, start).map_err(|error| {
                warn!(source = source.name(), key, %error, "series fetch failed");
                FetchFailure {
                    source: source.name().to_string(),
                    item: key.to_string(),
                    error,
                }
            })
        })
        .collect();

    let mut series = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(s) => series.push(s),
            Err(failure) => failures.push(failure),
        }
    }
    SeriesBatch { series, failures }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SampleSource;

    #[test]
    fn one_failed_period_does_not_sink_the_batch() {
        let source = SampleSource::new(3);
        let batch = fetch_year_tables(&source, &[2024, 1999, 2025]);

        assert_eq!(batch.tables.len(), 2);
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].item, "1999");
        // Order follows the requested periods, not completion order.
        assert_eq!(batch.tables[0].period, "2024");
        assert_eq!(batch.tables[1].period, "2025");
    }

    #[test]
    fn all_periods_failing_yields_an_empty_table() {
        let source = SampleSource::new(3);
        let run = build_canonical_table(&source, &[1998, 1999], &NormalizeOptions::default())
            .unwrap();
        assert!(run.normalized.table.is_empty());
        assert_eq!(run.failures.len(), 2);
    }

    #[test]
    fn catalog_fetch_isolates_failures() {
        struct Flaky;
        impl SeriesSource for Flaky {
            fn name(&self) -> &str {
                "flaky"
            }

            fn fetch_series(
                &self,
                key: &str,
                label: &str,
                _start: Option<NaiveDate>,
            ) -> Result<NamedSeries, DataError> {
                if key == "BAD" {
                    return Err(DataError::Unavailable("boom".to_string()));
                }
                Ok(NamedSeries::from_points(label, Vec::new()))
            }
        }

        let batch = fetch_catalog(&Flaky, &[("Good", "GOOD"), ("Bad", "BAD")], None);
        assert_eq!(batch.series.len(), 1);
        assert_eq!(batch.series[0].name, "Good");
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].item, "BAD");
    }
}
