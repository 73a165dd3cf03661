//! Table normalization: heterogeneous `RawTable`s into one `CanonicalTable`.
//!
//! Design goals:
//!
//! - **Row-level validation**: skip bad rows, but report what happened
//! - **Deterministic behavior**: fixed denylist, first-seen column order
//! - **No hidden data invention**: missing stays missing until the
//!   documented fill step
//!
//! Normalization is idempotent: feeding a canonical table's `to_raw()`
//! form back through `normalize` reproduces the table.

use chrono::NaiveDate;

use crate::domain::{CanonicalRow, CanonicalTable, MISSING, RawTable, is_missing};
use crate::error::DataError;

/// How missing cells are represented in the canonical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// Fill missing cells with numeric zero after all-missing columns are
    /// dropped. Deliberately lossy: a filled zero is statistically
    /// indistinguishable from a true zero observation, and callers relying
    /// on exact values must be aware of the collapse.
    #[default]
    ZeroFill,
    /// Keep the missing sentinel (NaN) in the output.
    Strict,
}

/// Normalization settings.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Columns dropped by label before any inference (fixed denylist, not
    /// inferred). Matched case-insensitively after trimming.
    pub drop_columns: Vec<String>,
    pub missing_policy: MissingPolicy,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            // The treasury table's degenerate 1.5-month bucket has no
            // usable history and is dropped unconditionally.
            drop_columns: vec!["1.5 Mo".to_string()],
            missing_policy: MissingPolicy::ZeroFill,
        }
    }
}

/// A row-level error encountered during normalization.
///
/// `line` is the 1-based record index within its table; 0 marks a
/// table-level note (e.g. a table with no date column).
#[derive(Debug, Clone)]
pub struct RowError {
    pub table: String,
    pub line: usize,
    pub message: String,
}

/// Normalization output: the canonical table plus row-level diagnostics.
#[derive(Debug, Clone)]
pub struct NormalizeOutput {
    pub table: CanonicalTable,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Cell tokens treated as missing (case-insensitive, after trimming).
const MISSING_TOKENS: [&str; 1] = ["N/A"];

/// Normalize a batch of raw tables into one canonical table.
///
/// Steps, in order: union of column labels (first-seen order) minus the
/// denylist; per-cell missing-token replacement; numeric coercion
/// (failures become missing, not errors); per-row date parsing (failures
/// become row errors, not table errors); drop of all-missing columns;
/// missing-policy fill; ascending date sort.
///
/// A batch with no input rows at all yields an explicitly empty table, not
/// an error; callers must check emptiness before deriving metrics. The
/// only structural error is input rows with no date column anywhere.
pub fn normalize(
    tables: &[RawTable],
    options: &NormalizeOptions,
) -> Result<NormalizeOutput, DataError> {
    let total_rows: usize = tables.iter().map(|t| t.records.len()).sum();
    if total_rows == 0 {
        return Ok(NormalizeOutput {
            table: CanonicalTable::default(),
            row_errors: Vec::new(),
            rows_read: 0,
            rows_used: 0,
        });
    }

    // 1) Union of value-column labels across inputs, first-seen order.
    //    Duplicate labels collapse to their first occurrence.
    let mut columns: Vec<String> = Vec::new();
    let mut saw_date_column = false;
    for table in tables {
        for header in &table.headers {
            if is_date_label(header) {
                saw_date_column = true;
                continue;
            }
            if is_denied(header, options) {
                continue;
            }
            if !columns.iter().any(|c| c == header) {
                columns.push(header.clone());
            }
        }
    }
    if !saw_date_column {
        return Err(DataError::MalformedResponse(
            "no `Date` column in any input table".to_string(),
        ));
    }

    let mut rows: Vec<CanonicalRow> = Vec::new();
    let mut row_errors: Vec<RowError> = Vec::new();
    let mut rows_read = 0usize;

    for table in tables {
        let tag = table_tag(table);

        // Positions of each canonical column within this table's headers.
        let local: Vec<Option<usize>> = columns
            .iter()
            .map(|c| table.headers.iter().position(|h| h == c))
            .collect();

        let Some(date_idx) = table.headers.iter().position(|h| is_date_label(h)) else {
            if !table.records.is_empty() {
                rows_read += table.records.len();
                row_errors.push(RowError {
                    table: tag,
                    line: 0,
                    message: format!(
                        "table has no date column; {} rows dropped",
                        table.records.len()
                    ),
                });
            }
            continue;
        };

        for (idx, record) in table.records.iter().enumerate() {
            let line = idx + 1;
            rows_read += 1;

            if record.cells.len() > table.headers.len() {
                row_errors.push(RowError {
                    table: tag.clone(),
                    line,
                    message: format!(
                        "row has {} cells for {} headers",
                        record.cells.len(),
                        table.headers.len()
                    ),
                });
                continue;
            }

            // 7) Parse the date; a bad date rejects the row, not the table.
            let raw_date = record.cells.get(date_idx).map(|s| s.trim()).unwrap_or("");
            let date = match parse_date(raw_date) {
                Ok(d) => d,
                Err(message) => {
                    row_errors.push(RowError {
                        table: tag.clone(),
                        line,
                        message,
                    });
                    continue;
                }
            };

            // 3+6) Missing-token replacement and numeric coercion. Rows
            // shorter than the header list are padded with missing.
            let values = local
                .iter()
                .map(|pos| {
                    let cell = pos
                        .and_then(|p| record.cells.get(p))
                        .map(|s| s.as_str())
                        .unwrap_or("");
                    coerce_cell(cell)
                })
                .collect();

            let period = (!record.period.is_empty()).then(|| record.period.clone());
            rows.push(CanonicalRow {
                date,
                period,
                values,
            });
        }
    }

    // 4) Drop columns with no live data in the selected periods.
    let keep: Vec<usize> = (0..columns.len())
        .filter(|&c| rows.iter().any(|r| !is_missing(r.values[c])))
        .collect();
    if keep.len() != columns.len() {
        columns = keep.iter().map(|&c| columns[c].clone()).collect();
        for row in &mut rows {
            row.values = keep.iter().map(|&c| row.values[c]).collect();
        }
    }

    // 5) Apply the missing-value policy.
    if options.missing_policy == MissingPolicy::ZeroFill {
        for row in &mut rows {
            for v in &mut row.values {
                if is_missing(*v) {
                    *v = 0.0;
                }
            }
        }
    }

    // 8) Sort ascending by date (stable: ties keep input order).
    rows.sort_by_key(|r| r.date);

    let rows_used = rows.len();
    Ok(NormalizeOutput {
        table: CanonicalTable { columns, rows },
        row_errors,
        rows_read,
        rows_used,
    })
}

fn table_tag(table: &RawTable) -> String {
    format!("{}/{}", table.source, table.period)
}

fn is_date_label(label: &str) -> bool {
    label.trim().eq_ignore_ascii_case("date")
}

fn is_denied(label: &str, options: &NormalizeOptions) -> bool {
    options
        .drop_columns
        .iter()
        .any(|c| c.trim().eq_ignore_ascii_case(label.trim()))
}

fn is_missing_token(cell: &str) -> bool {
    let t = cell.trim();
    t.is_empty() || MISSING_TOKENS.iter().any(|tok| t.eq_ignore_ascii_case(tok))
}

/// Coerce one cell to a value: missing tokens and unparsable or non-finite
/// numbers all become the missing sentinel.
fn coerce_cell(cell: &str) -> f64 {
    if is_missing_token(cell) {
        return MISSING;
    }
    match cell.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => MISSING,
    }
}

/// Accepted date formats: ISO plus the US-style forms the treasury pages
/// emit. Parsing stays deterministic; anything else is a row error.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%Y/%m/%d"];

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "invalid date '{s}' (expected YYYY-MM-DD, MM/DD/YYYY, MM/DD/YY, or YYYY/MM/DD)"
    ))
}
