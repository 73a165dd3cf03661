//! Indicator summaries: per-series headline statistics with alert labels.
//!
//! This is the table a dashboard shows next to its charts: latest value,
//! historical mean and dispersion, where today sits in z-score terms, and
//! a categorical alert. Formatting lives in `format` so the statistics
//! stay clean and snapshot-testable.

pub mod format;

pub use format::format_summary_table;

use std::cmp::Ordering;

use crate::domain::{AlertLabel, MISSING, NamedSeries};
use crate::metrics;
use crate::stats;

/// Headline statistics for one indicator series.
///
/// Fields are the missing sentinel when undefined (empty series, zero
/// variance).
#[derive(Debug, Clone)]
pub struct IndicatorSummary {
    pub name: String,
    pub last: f64,
    pub mean: f64,
    pub stddev: f64,
    pub zscore: f64,
    pub alert: AlertLabel,
}

/// Summarize one series over its full history.
pub fn summarize(series: &NamedSeries) -> IndicatorSummary {
    let values: Vec<f64> = series.points.iter().map(|&(_, v)| v).collect();
    let mean = stats::mean(&values).unwrap_or(MISSING);
    let stddev = stats::sample_stddev(&values).unwrap_or(MISSING);
    let last = series.last_value().unwrap_or(MISSING);

    let zscore = if last.is_finite() && mean.is_finite() && stddev.is_finite() && stddev > 0.0 {
        (last - mean) / stddev
    } else {
        MISSING
    };

    IndicatorSummary {
        name: series.name.clone(),
        last,
        mean,
        stddev,
        zscore,
        alert: metrics::alert(zscore),
    }
}

/// Summarize a set of indicators, sorted by current z-score descending.
///
/// Undefined z-scores sink to the bottom.
pub fn summarize_all(series: &[NamedSeries]) -> Vec<IndicatorSummary> {
    let mut out: Vec<IndicatorSummary> = series.iter().map(summarize).collect();
    out.sort_by(|a, b| match (a.zscore.is_nan(), b.zscore.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.zscore.partial_cmp(&a.zscore).unwrap_or(Ordering::Equal),
    });
    out
}
