//! FRED series acquisition.
//!
//! Requests go to the `series/observations` endpoint with `file_type=json`.
//! The response is already a typed time series, so there is no HTML
//! handling here, only missing-token and date parsing. FRED encodes a
//! missing observation as `"."`; those are dropped at the source so the
//! series arrives gap-free by construction.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::data::SeriesSource;
use crate::domain::NamedSeries;
use crate::error::DataError;

const BASE_URL: &str = "https://api.stlouisfed.org/fred/series/observations";
const OBS_LIMIT: usize = 10000;

pub struct FredClient {
    client: Client,
    api_key: String,
}

impl FredClient {
    /// Build a client from `FRED_API_KEY` in the environment (`.env`
    /// files are honored via dotenvy).
    pub fn from_env() -> Result<Self, DataError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("FRED_API_KEY").map_err(|_| {
            DataError::MissingCredential("FRED_API_KEY not set in environment (.env)".to_string())
        })?;
        Ok(Self::new(api_key))
    }

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    date: String,
    value: String,
}

impl SeriesSource for FredClient {
    fn name(&self) -> &str {
        "fred"
    }

    fn fetch_series(
        &self,
        code: &str,
        label: &str,
        start: Option<NaiveDate>,
    ) -> Result<NamedSeries, DataError> {
        let mut req = self.client.get(BASE_URL).query(&[
            ("series_id", code),
            ("api_key", &self.api_key),
            ("file_type", "json"),
            ("sort_order", "asc"),
            ("limit", &OBS_LIMIT.to_string()),
        ]);

        if let Some(date) = start {
            req = req.query(&[("observation_start", &date.to_string())]);
        }

        let resp = req
            .send()
            .map_err(|e| DataError::Unavailable(format!("FRED request for {code} failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(DataError::Unavailable(format!(
                "FRED request for {code} failed with status {}",
                resp.status()
            )));
        }

        let body: ObservationsResponse = resp.json().map_err(|e| {
            DataError::MalformedResponse(format!("failed to parse FRED response for {code}: {e}"))
        })?;

        let mut points = Vec::with_capacity(body.observations.len());
        for obs in body.observations {
            let Some(value) = parse_value(&obs.value) else {
                continue;
            };
            let date = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d").map_err(|e| {
                DataError::MalformedResponse(format!("invalid FRED date '{}': {e}", obs.date))
            })?;
            points.push((date, value));
        }

        debug!(code, n = points.len(), "fetched FRED series");
        Ok(NamedSeries::from_points(label, points))
    }
}

/// FRED's missing-observation token is "."; empty and non-finite values
/// are treated the same way.
fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}
