//! End-to-end scenario driven by the offline sample source: two treasury
//! years with diverging header sets, spread derivation over the merged
//! table, and cross-asset alignment against an equity return series.

use std::collections::HashSet;

use chrono::NaiveDate;

use macro_monitor::align::align;
use macro_monitor::data::{SampleSource, SeriesSource};
use macro_monitor::metrics;
use macro_monitor::normalize::NormalizeOptions;
use macro_monitor::pipeline;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn yield_table_to_cross_asset_alignment() {
    let source = SampleSource::new(7);
    let run = pipeline::build_canonical_table(&source, &[2024, 2025], &NormalizeOptions::default())
        .expect("pipeline run");
    assert!(run.failures.is_empty());

    let table = &run.normalized.table;
    assert!(!table.is_empty());
    assert_eq!(run.normalized.rows_used, 6);

    // 2025 introduced the short 1 Mo bucket: the union carries it, and the
    // denylisted 1.5 Mo bucket is gone.
    assert!(table.column_index("1 Mo").is_some());
    assert!(table.column_index("1.5 Mo").is_none());

    // 2024 rows predate the 1 Mo bucket; the default policy fills zero.
    let one_mo = table.series("1 Mo").expect("1 Mo series");
    let early: Vec<f64> = one_mo
        .points
        .iter()
        .filter(|&&(date, _)| date < d(2025, 1, 1))
        .map(|&(_, v)| v)
        .collect();
    assert_eq!(early, vec![0.0, 0.0, 0.0]);

    // Sort invariant over the merged years.
    assert!(table.rows.windows(2).all(|w| w[0].date <= w[1].date));

    // One spread value per merged-table date.
    let ten = table.series("10 Yr").expect("10 Yr series");
    let two = table.series("2 Yr").expect("2 Yr series");
    let spread = metrics::spread(&ten, &two);
    assert_eq!(spread.len(), table.rows.len());
    assert!((spread.points[0].1 - (3.95 - 4.33)).abs() < 1e-12);

    // Aligning the spread with an equity return series restricts the
    // output to their common date range.
    let prices = source
        .fetch_series("^GSPC", "S&P 500", None)
        .expect("equity series");
    let returns = metrics::cumulative_return(&prices);

    let aligned = align(&[spread.clone(), returns.clone()]);
    assert_eq!(aligned.columns.len(), 2);
    assert_eq!(aligned.columns[0], spread.name);

    let spread_dates: HashSet<NaiveDate> = spread.points.iter().map(|&(date, _)| date).collect();
    let return_dates: HashSet<NaiveDate> = returns.points.iter().map(|&(date, _)| date).collect();
    assert!(!aligned.is_empty());
    for date in &aligned.dates {
        assert!(spread_dates.contains(date));
        assert!(return_dates.contains(date));
    }

    // The synthetic equity walk covers 2024 only, so the overlap is the
    // three 2024 treasury dates.
    assert_eq!(
        aligned.dates,
        vec![d(2024, 1, 2), d(2024, 1, 3), d(2024, 1, 4)]
    );
}

#[test]
fn failed_periods_are_reported_next_to_the_survivors() {
    let source = SampleSource::new(7);
    let run = pipeline::build_canonical_table(
        &source,
        &[2024, 2030],
        &NormalizeOptions::default(),
    )
    .expect("pipeline run");

    assert_eq!(run.failures.len(), 1);
    assert_eq!(run.failures[0].item, "2030");
    assert_eq!(run.normalized.rows_used, 3);
}

#[test]
fn labor_catalog_summarizes_with_alerts() {
    let source = SampleSource::new(42);
    let batch = pipeline::fetch_catalog(&source, macro_monitor::data::catalog::LABOR_MARKET, None);
    assert!(batch.failures.is_empty());
    assert_eq!(batch.series.len(), macro_monitor::data::catalog::LABOR_MARKET.len());

    let summaries = macro_monitor::report::summarize_all(&batch.series);
    // Sorted by z-score descending.
    for pair in summaries.windows(2) {
        assert!(pair[0].zscore >= pair[1].zscore);
    }

    let text = macro_monitor::report::format_summary_table(&summaries);
    assert!(text.contains("Unemployment Rate"));
    assert!(text.contains("Initial Claims (ICSA)"));

    // The heatmap path: z-score history resampled to a continuous monthly
    // index, every bucket populated (the walks have no month-long gaps).
    let z = metrics::zscore(&batch.series[0]);
    let monthly = metrics::resample_monthly_mean(&z);
    assert!(monthly.len() >= 11);
    assert!(monthly.points.iter().all(|&(_, v)| v.is_finite()));
}
