//! Cross-series date alignment (strict inner join).

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::domain::{AlignedTable, MISSING, NamedSeries};

/// Align series on the intersection of their dates.
///
/// Dates missing from any one input are excluded from the result entirely:
/// cross-asset comparison requires every series to have a value on every
/// retained date. Callers wanting a union alignment must resample first.
/// Series with no overlap at all produce an explicitly empty table, not an
/// error.
///
/// Output columns are named by the input series identifiers; disambiguating
/// duplicate names is the caller's responsibility.
pub fn align(series: &[NamedSeries]) -> AlignedTable {
    if series.is_empty() {
        return AlignedTable::default();
    }

    let mut common: Option<BTreeSet<NaiveDate>> = None;
    for s in series {
        let dates: BTreeSet<NaiveDate> = s.points.iter().map(|&(d, _)| d).collect();
        common = Some(match common {
            None => dates,
            Some(mut set) => {
                set.retain(|d| dates.contains(d));
                set
            }
        });
    }
    let dates: Vec<NaiveDate> = common.unwrap_or_default().into_iter().collect();

    let columns: Vec<String> = series.iter().map(|s| s.name.clone()).collect();
    let lookups: Vec<HashMap<NaiveDate, f64>> = series
        .iter()
        .map(|s| s.points.iter().copied().collect())
        .collect();

    let rows = dates
        .iter()
        .map(|d| {
            lookups
                .iter()
                .map(|m| m.get(d).copied().unwrap_or(MISSING))
                .collect()
        })
        .collect();

    AlignedTable {
        dates,
        columns,
        rows,
    }
}
