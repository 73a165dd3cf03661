//! Treasury daily-yield-curve acquisition.
//!
//! One HTTP GET per calendar year; the response is an HTML page holding a
//! single data table identified by a stable CSS-class marker. The site
//! also tags the table with a `cols-N` class, but N tracks the column
//! count and changes between eras, so the match omits it.
//!
//! The table comes back as-is: strings, one header list paired 1:1 with
//! each row's cells, the year tag attached to every record. Header
//! differences between years are the normalizer's problem, not ours.

use std::time::Duration;

use reqwest::blocking::Client;
use scraper::{Html, Selector};
use tracing::debug;

use crate::data::TableSource;
use crate::domain::{RawRecord, RawTable, Year};
use crate::error::DataError;

const BASE_URL: &str =
    "https://home.treasury.gov/resource-center/data-chart-center/interest-rates/TextView";

/// Stable class identity of the daily par-yield table.
const TABLE_MARKER: &str = "table.usa-table.views-table.views-view-table";

pub struct TreasuryClient {
    client: Client,
}

impl TreasuryClient {
    pub fn new() -> Result<Self, DataError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DataError::Unavailable(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl TableSource for TreasuryClient {
    fn name(&self) -> &str {
        "treasury"
    }

    fn fetch_period_table(&self, period: Year) -> Result<RawTable, DataError> {
        let resp = self
            .client
            .get(BASE_URL)
            .query(&[
                ("type", "daily_treasury_yield_curve"),
                ("field_tdr_date_value", &period.to_string()),
            ])
            .send()
            .map_err(|e| DataError::Unavailable(format!("treasury request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(DataError::Unavailable(format!(
                "treasury request for {period} failed with status {}",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .map_err(|e| DataError::Unavailable(format!("treasury response read failed: {e}")))?;

        let table = parse_year_page(&body, period)?;
        debug!(year = period, rows = table.records.len(), "fetched treasury table");
        Ok(table)
    }
}

/// Extract the yield-curve table from one year's page.
///
/// Split out from the HTTP path so it can be exercised against captured
/// HTML without a network connection.
pub fn parse_year_page(html: &str, period: Year) -> Result<RawTable, DataError> {
    let table_sel = selector(TABLE_MARKER)?;
    let th_sel = selector("th")?;
    let tr_sel = selector("tr")?;
    let td_sel = selector("td")?;

    let doc = Html::parse_document(html);
    let table = doc
        .select(&table_sel)
        .next()
        .ok_or_else(|| {
            DataError::MalformedResponse(format!("no yield-curve table found for {period}"))
        })?;

    let headers: Vec<String> = table
        .select(&th_sel)
        .map(|th| collapse_whitespace(&th.text().collect::<String>()))
        .collect();
    if headers.is_empty() {
        return Err(DataError::MalformedResponse(format!(
            "yield-curve table for {period} has no header row"
        )));
    }

    let mut records = Vec::new();
    for tr in table.select(&tr_sel) {
        let cells: Vec<String> = tr
            .select(&td_sel)
            .map(|td| collapse_whitespace(&td.text().collect::<String>()))
            .collect();
        // The header row has no <td> children.
        if cells.is_empty() {
            continue;
        }
        records.push(RawRecord {
            period: period.to_string(),
            cells,
        });
    }

    Ok(RawTable {
        source: "treasury".to_string(),
        period: period.to_string(),
        headers,
        records,
    })
}

fn selector(css: &str) -> Result<Selector, DataError> {
    Selector::parse(css)
        .map_err(|e| DataError::MalformedResponse(format!("bad selector '{css}': {e}")))
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <table class="usa-table views-table views-view-table cols-13">
          <thead><tr>
            <th>Date</th><th>1 Mo</th><th>2 Yr</th><th>10 Yr</th>
          </tr></thead>
          <tbody>
            <tr><td>01/02/2025</td><td>4.40</td><td>4.25</td><td>4.57</td></tr>
            <tr><td>01/03/2025</td><td> 4.41 </td><td>N/A</td><td>4.60</td></tr>
          </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn parses_headers_and_rows() {
        let table = parse_year_page(PAGE, 2025).unwrap();
        assert_eq!(table.headers, vec!["Date", "1 Mo", "2 Yr", "10 Yr"]);
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[0].cells[0], "01/02/2025");
        assert_eq!(table.records[0].period, "2025");
        // Whitespace collapses; missing tokens pass through untouched.
        assert_eq!(table.records[1].cells[1], "4.41");
        assert_eq!(table.records[1].cells[2], "N/A");
    }

    #[test]
    fn missing_table_is_malformed() {
        let err = parse_year_page("<html><body><p>maintenance</p></body></html>", 2025)
            .unwrap_err();
        assert!(matches!(err, DataError::MalformedResponse(_)));
    }

    #[test]
    fn table_without_headers_is_malformed() {
        let page = r#"<table class="usa-table views-table views-view-table">
            <tr><td>01/02/2025</td></tr></table>"#;
        let err = parse_year_page(page, 2025).unwrap_err();
        assert!(matches!(err, DataError::MalformedResponse(_)));
    }
}
