//! Deterministic offline data source for tests and offline runs.
//!
//! Treasury tables are canned: two years whose header sets differ the way
//! the live site's do (the short `1 Mo` bucket only exists in the later
//! year, and the degenerate `1.5 Mo` bucket appears in both). Macro and
//! equity series are random walks from a seeded RNG, so the same seed and
//! key always reproduce the same series.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{Datelike, NaiveDate, Weekday};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::data::{SeriesSource, TableSource};
use crate::domain::{NamedSeries, RawRecord, RawTable, Year};
use crate::error::DataError;

/// Number of daily observations generated per synthetic series.
const SERIES_LEN: usize = 250;

/// Daily log-volatility of the synthetic walks.
const DAILY_SIGMA: f64 = 0.01;

pub struct SampleSource {
    seed: u64,
}

impl SampleSource {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl TableSource for SampleSource {
    fn name(&self) -> &str {
        "sample"
    }

    fn fetch_period_table(&self, period: Year) -> Result<RawTable, DataError> {
        match period {
            2024 => Ok(table_2024()),
            2025 => Ok(table_2025()),
            _ => Err(DataError::Unavailable(format!(
                "no sample data for {period}"
            ))),
        }
    }
}

impl SeriesSource for SampleSource {
    fn name(&self) -> &str {
        "sample"
    }

    fn fetch_series(
        &self,
        key: &str,
        label: &str,
        start: Option<NaiveDate>,
    ) -> Result<NamedSeries, DataError> {
        // Key-dependent seed: distinct series differ, same inputs repeat.
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let mut rng = StdRng::seed_from_u64(self.seed ^ hasher.finish());

        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| DataError::Unavailable(format!("noise distribution error: {e}")))?;

        let start = match start {
            Some(d) => d,
            None => NaiveDate::from_ymd_opt(2024, 1, 1)
                .ok_or_else(|| DataError::Unavailable("invalid default start date".to_string()))?,
        };

        let mut points = Vec::with_capacity(SERIES_LEN);
        let mut level = 100.0;
        let mut date = start;
        while points.len() < SERIES_LEN {
            let next = date
                .succ_opt()
                .ok_or_else(|| DataError::Unavailable("date range exhausted".to_string()))?;
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                date = next;
                continue;
            }
            level *= (DAILY_SIGMA * normal.sample(&mut rng)).exp();
            points.push((date, level));
            date = next;
        }

        Ok(NamedSeries::from_points(label, points))
    }
}

fn headers(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

fn record(period: &str, cells: &[&str]) -> RawRecord {
    RawRecord {
        period: period.to_string(),
        cells: cells.iter().map(|s| s.to_string()).collect(),
    }
}

fn table_2024() -> RawTable {
    RawTable {
        source: "sample".to_string(),
        period: "2024".to_string(),
        headers: headers(&["Date", "1.5 Mo", "2 Yr", "10 Yr"]),
        records: vec![
            record("2024", &["01/02/2024", "N/A", "4.33", "3.95"]),
            record("2024", &["01/03/2024", "N/A", "4.31", "3.91"]),
            record("2024", &["01/04/2024", "N/A", "4.38", "4.00"]),
        ],
    }
}

fn table_2025() -> RawTable {
    RawTable {
        source: "sample".to_string(),
        period: "2025".to_string(),
        headers: headers(&["Date", "1 Mo", "1.5 Mo", "2 Yr", "10 Yr"]),
        records: vec![
            record("2025", &["01/02/2025", "4.40", "N/A", "4.25", "4.57"]),
            record("2025", &["01/03/2025", "4.41", "N/A", "4.28", "4.60"]),
            record("2025", &["01/06/2025", "4.43", "N/A", "4.27", "4.61"]),
        ],
    }
}
