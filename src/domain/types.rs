//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed by value between pipeline stages
//! - handed to a presentation layer for rendering or export
//! - reloaded later for comparisons

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// In-memory missing-value sentinel.
///
/// NaN stands in for: cells holding a missing token before the fill step,
/// gaps propagated through derived series, and undefined statistics
/// (zero-variance z-score, division by zero in percentage change).
pub const MISSING: f64 = f64::NAN;

/// True if a value is the missing sentinel (or otherwise non-finite).
pub fn is_missing(v: f64) -> bool {
    !v.is_finite()
}

/// A calendar year, the period unit understood by period-keyed sources.
pub type Year = i32;

/// One row as fetched: ordered string cells plus the period tag it came from.
///
/// No type guarantees at this stage; cells may hold placeholder tokens
/// ("N/A", empty string) and row lengths may disagree with the header list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub period: String,
    pub cells: Vec<String>,
}

/// One semi-structured table for a single period, as returned by a source.
///
/// `headers` pairs 1:1 by position with each record's `cells`. Header sets
/// may differ between periods (columns appear and disappear over time);
/// reconciling them is the normalizer's job, not the acquirer's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub source: String,
    pub period: String,
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

/// A normalized row: calendar date, optional period tag, and one value per
/// canonical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRow {
    pub date: NaiveDate,
    pub period: Option<String>,
    pub values: Vec<f64>,
}

/// The canonical table: one consistent column set, typed numeric values,
/// rows sorted ascending by date.
///
/// Invariant: `values.len() == columns.len()` for every row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanonicalTable {
    pub columns: Vec<String>,
    pub rows: Vec<CanonicalRow>,
}

impl CanonicalTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    /// Project one value column to a named series.
    pub fn series(&self, label: &str) -> Option<NamedSeries> {
        let idx = self.column_index(label)?;
        Some(NamedSeries::from_points(
            label,
            self.rows.iter().map(|r| (r.date, r.values[idx])).collect(),
        ))
    }

    /// Convert back to the raw shape: ISO dates, missing cells as "N/A".
    ///
    /// Normalizing the result reproduces this table, which keeps the
    /// normalizer's idempotence directly testable.
    pub fn to_raw(&self) -> RawTable {
        let mut headers = Vec::with_capacity(self.columns.len() + 1);
        headers.push("Date".to_string());
        headers.extend(self.columns.iter().cloned());

        let records = self
            .rows
            .iter()
            .map(|row| RawRecord {
                period: row.period.clone().unwrap_or_default(),
                cells: std::iter::once(row.date.format("%Y-%m-%d").to_string())
                    .chain(row.values.iter().map(|&v| {
                        if is_missing(v) {
                            "N/A".to_string()
                        } else {
                            format!("{v}")
                        }
                    }))
                    .collect(),
            })
            .collect();

        RawTable {
            source: "canonical".to_string(),
            period: String::new(),
            headers,
            records,
        }
    }
}

/// An identifier paired with an ordered-by-date sequence of observations.
///
/// Invariant: points are sorted ascending by date with no duplicate dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSeries {
    pub name: String,
    pub points: Vec<(NaiveDate, f64)>,
}

impl NamedSeries {
    /// Build a series from unordered observations: sorts ascending by date
    /// and drops duplicate dates (first observation wins).
    pub fn from_points(name: impl Into<String>, mut points: Vec<(NaiveDate, f64)>) -> Self {
        points.sort_by_key(|&(d, _)| d);
        points.dedup_by_key(|&mut (d, _)| d);
        Self {
            name: name.into(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Latest observation, if any.
    pub fn last_value(&self) -> Option<f64> {
        self.points.last().map(|&(_, v)| v)
    }

    /// Values with the missing sentinel filtered out.
    pub fn finite_values(&self) -> Vec<f64> {
        self.points
            .iter()
            .map(|&(_, v)| v)
            .filter(|v| v.is_finite())
            .collect()
    }
}

/// A series produced by a pure function of one or more input series.
///
/// Structurally identical to `NamedSeries`; the alias marks provenance at
/// API boundaries.
pub type DerivedSeries = NamedSeries;

/// Cross-series comparison table: the strict inner join of several series.
///
/// `rows` holds one row per date with one value per column; column names
/// are the input series identifiers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlignedTable {
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl AlignedTable {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Categorical alert derived from a z-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLabel {
    /// z > +1: the indicator sits unusually high versus its own history.
    Elevated,
    /// z < -1: unusually low.
    Depressed,
    /// Everything else, including an undefined z-score.
    Normal,
}
