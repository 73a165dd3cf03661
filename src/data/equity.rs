//! Equity closing-price acquisition (Yahoo v8 chart API).
//!
//! Daily closes only; the rest of the quote payload is ignored. Yahoo has
//! no official API and the shape changes without notice, so everything
//! structural maps to `MalformedResponse`. An unknown or delisted ticker
//! fails individually; batch callers report it next to the tickers that
//! did resolve.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::data::SeriesSource;
use crate::domain::NamedSeries;
use crate::error::DataError;

/// 2100-01-01: asking for everything through "now" without reading the
/// clock keeps fetches deterministic to construct.
const FAR_FUTURE_TS: i64 = 4_102_444_800;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    close: Vec<Option<f64>>,
}

pub struct EquityClient {
    client: Client,
}

impl EquityClient {
    pub fn new() -> Result<Self, DataError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::Unavailable(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    fn chart_url(ticker: &str, start: Option<NaiveDate>) -> String {
        let start_ts = start
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or(0);
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{ticker}\
             ?period1={start_ts}&period2={FAR_FUTURE_TS}&interval=1d"
        )
    }
}

impl SeriesSource for EquityClient {
    fn name(&self) -> &str {
        "equity"
    }

    fn fetch_series(
        &self,
        ticker: &str,
        label: &str,
        start: Option<NaiveDate>,
    ) -> Result<NamedSeries, DataError> {
        let url = Self::chart_url(ticker, start);
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::Unavailable(format!("equity request for {ticker} failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(DataError::Unavailable(format!(
                "equity request for {ticker} failed with status {}",
                resp.status()
            )));
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            DataError::MalformedResponse(format!("failed to parse chart response for {ticker}: {e}"))
        })?;

        let series = parse_close_series(ticker, label, chart)?;
        debug!(ticker, n = series.len(), "fetched equity closes");
        Ok(series)
    }
}

/// Pull the close series out of a chart response.
///
/// Timestamps without a close (holidays, halted sessions) are skipped, so
/// the result holds actual observations only.
fn parse_close_series(
    ticker: &str,
    label: &str,
    resp: ChartResponse,
) -> Result<NamedSeries, DataError> {
    let result = resp.chart.result.ok_or_else(|| match resp.chart.error {
        Some(err) => DataError::Unavailable(format!(
            "no data for ticker {ticker}: {}: {}",
            err.code, err.description
        )),
        None => DataError::MalformedResponse("empty chart result with no error".to_string()),
    })?;

    let data = result
        .into_iter()
        .next()
        .ok_or_else(|| DataError::MalformedResponse("chart result array is empty".to_string()))?;

    let timestamps = data
        .timestamp
        .ok_or_else(|| DataError::MalformedResponse(format!("no timestamps for {ticker}")))?;

    let quote = data
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| DataError::MalformedResponse(format!("no quote data for {ticker}")))?;

    let mut points = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let Some(close) = quote.close.get(i).copied().flatten() else {
            continue;
        };
        let date = chrono::DateTime::from_timestamp(ts, 0)
            .map(|dt| dt.naive_utc().date())
            .ok_or_else(|| DataError::MalformedResponse(format!("invalid timestamp {ts}")))?;
        points.push((date, close));
    }

    if points.is_empty() {
        return Err(DataError::Unavailable(format!(
            "no close observations for ticker {ticker}"
        )));
    }

    Ok(NamedSeries::from_points(label, points))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(timestamps: Vec<i64>, closes: Vec<Option<f64>>) -> ChartResponse {
        ChartResponse {
            chart: ChartResult {
                result: Some(vec![ChartData {
                    timestamp: Some(timestamps),
                    indicators: Indicators {
                        quote: vec![QuoteData { close: closes }],
                    },
                }]),
                error: None,
            },
        }
    }

    #[test]
    fn skips_timestamps_without_a_close() {
        // 2024-01-02 and 2024-01-04, with a None in between.
        let resp = chart(
            vec![1_704_153_600, 1_704_240_000, 1_704_326_400],
            vec![Some(100.0), None, Some(102.0)],
        );
        let s = parse_close_series("SPY", "S&P 500", resp).unwrap();
        assert_eq!(s.name, "S&P 500");
        assert_eq!(s.len(), 2);
        assert_eq!(s.points[0].1, 100.0);
        assert_eq!(s.points[1].1, 102.0);
    }

    #[test]
    fn provider_error_reports_the_ticker() {
        let resp = ChartResponse {
            chart: ChartResult {
                result: None,
                error: Some(ChartError {
                    code: "Not Found".to_string(),
                    description: "No data found".to_string(),
                }),
            },
        };
        let err = parse_close_series("NOPE", "Nope", resp).unwrap_err();
        assert!(matches!(err, DataError::Unavailable(msg) if msg.contains("NOPE")));
    }

    #[test]
    fn all_missing_closes_is_unavailable() {
        let resp = chart(vec![1_704_153_600], vec![None]);
        let err = parse_close_series("HALT", "Halted", resp).unwrap_err();
        assert!(matches!(err, DataError::Unavailable(_)));
    }
}
