//! Plain-text formatting for indicator summaries.
//!
//! We keep formatting code in one place so:
//! - the statistics code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::AlertLabel;

use super::IndicatorSummary;

/// Format the indicator summary as a fixed-width text table.
pub fn format_summary_table(rows: &[IndicatorSummary]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<6} {:<40} {:>14} {:>14} {:>8} {:>14}\n",
        "alert", "indicator", "last", "mean", "z", "stddev"
    ));
    out.push_str(&format!(
        "{:-<6} {:-<40} {:-<14} {:-<14} {:-<8} {:-<14}\n",
        "", "", "", "", "", ""
    ));

    for r in rows {
        out.push_str(&format!(
            "{:<6} {:<40} {:>14} {:>14} {:>8} {:>14}\n",
            alert_tag(r.alert),
            truncate(&r.name, 40),
            fmt_num(r.last),
            fmt_num(r.mean),
            fmt_num(r.zscore),
            fmt_num(r.stddev),
        ));
    }

    out
}

fn alert_tag(alert: AlertLabel) -> &'static str {
    match alert {
        AlertLabel::Elevated => "HIGH",
        AlertLabel::Depressed => "LOW",
        AlertLabel::Normal => "-",
    }
}

/// Two decimals with thousands separators; undefined values print "n/a".
fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "n/a".to_string();
    }

    let raw = format!("{:.2}", v.abs());
    let (int_part, frac) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    let sign = if v < 0.0 { "-" } else { "" };
    format!("{sign}{int_grouped}.{frac}")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}.")
}
