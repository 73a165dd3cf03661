//! Derived series: pure functions over `NamedSeries`, no I/O.
//!
//! Numeric semantics, shared by every function here:
//!
//! - all arithmetic is 64-bit floating point
//! - gaps and undefined results are the NaN missing sentinel, never a
//!   silently substituted zero
//! - binary operations use inner-join semantics (dates present in both
//!   inputs)

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::domain::{AlertLabel, DerivedSeries, MISSING, NamedSeries, is_missing};
use crate::stats;

/// Alert threshold in z-score units (fixed, not runtime-configurable).
pub const ALERT_Z_THRESHOLD: f64 = 1.0;

/// Difference of two series at matching dates.
///
/// Dates present in only one input are excluded; a missing value on either
/// side propagates as missing.
pub fn spread(a: &NamedSeries, b: &NamedSeries) -> DerivedSeries {
    let b_by_date: BTreeMap<NaiveDate, f64> = b.points.iter().copied().collect();
    let points = a
        .points
        .iter()
        .filter_map(|&(d, va)| b_by_date.get(&d).map(|&vb| (d, va - vb)))
        .collect();
    NamedSeries {
        name: format!("{} - {}", a.name, b.name),
        points,
    }
}

/// Z-score of every point against the full-history mean and sample
/// standard deviation.
///
/// The statistics are computed once over the finite points of the whole
/// series. With fewer than 2 finite points or zero variance, every point
/// is the missing sentinel; missing inputs stay missing.
pub fn zscore(s: &NamedSeries) -> DerivedSeries {
    let values: Vec<f64> = s.points.iter().map(|&(_, v)| v).collect();
    let moments = match (stats::mean(&values), stats::sample_stddev(&values)) {
        (Some(m), Some(sd)) if sd > 0.0 => Some((m, sd)),
        _ => None,
    };

    let points = s
        .points
        .iter()
        .map(|&(d, v)| {
            let z = match moments {
                Some((m, sd)) if v.is_finite() => (v - m) / sd,
                _ => MISSING,
            };
            (d, z)
        })
        .collect();

    NamedSeries {
        name: format!("zscore({})", s.name),
        points,
    }
}

/// Period-over-period percentage change.
///
/// The first point has no predecessor and is the missing sentinel, as is
/// any point whose predecessor is zero or missing.
pub fn pct_change(s: &NamedSeries) -> DerivedSeries {
    let mut points = Vec::with_capacity(s.len());
    for (i, &(d, v)) in s.points.iter().enumerate() {
        let r = if i == 0 {
            MISSING
        } else {
            let prev = s.points[i - 1].1;
            if is_missing(prev) || is_missing(v) || prev == 0.0 {
                MISSING
            } else {
                (v - prev) / prev
            }
        };
        points.push((d, r));
    }
    NamedSeries {
        name: format!("pct_change({})", s.name),
        points,
    }
}

/// Resample to calendar months, averaging finite observations per month.
///
/// The output index is the continuous month range from the first to the
/// last observation, keyed to the last calendar day of each month.
/// Interior months without observations are filled by linear interpolation
/// over the resampled index; leading and trailing gaps stay missing.
pub fn resample_monthly_mean(s: &NamedSeries) -> DerivedSeries {
    let name = format!("monthly_mean({})", s.name);

    let (Some(&(first, _)), Some(&(last, _))) = (s.points.first(), s.points.last()) else {
        return NamedSeries {
            name,
            points: Vec::new(),
        };
    };

    let mut sums: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();
    for &(d, v) in &s.points {
        if v.is_finite() {
            let entry = sums.entry((d.year(), d.month())).or_insert((0.0, 0));
            entry.0 += v;
            entry.1 += 1;
        }
    }

    let mut points = Vec::new();
    let mut cursor = (first.year(), first.month());
    let end = (last.year(), last.month());
    loop {
        let v = sums
            .get(&cursor)
            .map(|&(sum, n)| sum / n as f64)
            .unwrap_or(MISSING);
        if let Some(date) = month_end(cursor.0, cursor.1) {
            points.push((date, v));
        }
        if cursor == end {
            break;
        }
        cursor = if cursor.1 == 12 {
            (cursor.0 + 1, 1)
        } else {
            (cursor.0, cursor.1 + 1)
        };
    }

    interpolate_interior(&mut points);
    NamedSeries { name, points }
}

/// Compounded return relative to the first observation.
///
/// The first point is 0; a missing period-over-period change compounds as
/// zero change (the change series' gaps collapse, which is the documented
/// behavior of the cumulative view, not of `pct_change` itself).
pub fn cumulative_return(s: &NamedSeries) -> DerivedSeries {
    let changes = pct_change(s);
    let mut level = 1.0;
    let points = changes
        .points
        .iter()
        .map(|&(d, r)| {
            if r.is_finite() {
                level *= 1.0 + r;
            }
            (d, level - 1.0)
        })
        .collect();
    NamedSeries {
        name: format!("cumulative_return({})", s.name),
        points,
    }
}

/// Classify a z-score against the fixed ±1.0 thresholds.
///
/// An undefined (missing) z-score is `Normal`.
pub fn alert(z: f64) -> AlertLabel {
    if z > ALERT_Z_THRESHOLD {
        AlertLabel::Elevated
    } else if z < -ALERT_Z_THRESHOLD {
        AlertLabel::Depressed
    } else {
        AlertLabel::Normal
    }
}

/// Last calendar day of a month; `None` only outside chrono's date range.
fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

/// Fill interior missing runs by straight-line interpolation between the
/// nearest finite neighbors. Leading and trailing runs are left missing.
fn interpolate_interior(points: &mut [(NaiveDate, f64)]) {
    let n = points.len();
    let mut i = 0;
    while i < n {
        if points[i].1.is_finite() {
            i += 1;
            continue;
        }
        let start = i;
        while i < n && !points[i].1.is_finite() {
            i += 1;
        }
        if start == 0 || i == n {
            continue;
        }
        let left = points[start - 1].1;
        let right = points[i].1;
        let span = (i - start + 1) as f64;
        for (k, p) in points[start..i].iter_mut().enumerate() {
            let t = (k + 1) as f64 / span;
            p.1 = left + (right - left) * t;
        }
    }
}
