//! Named series catalogs: the FRED series groups and equity tickers the
//! dashboard tracks.
//!
//! Labels are display names, codes are provider identifiers. Labels are
//! unique within each group because the aligner names its output columns
//! after them. Grouping mirrors the dashboard's views (credit, emerging
//! markets, rates, labor market, equity).

/// `(display label, provider code)`.
pub type CatalogEntry = (&'static str, &'static str);

/// US corporate option-adjusted spreads by rating band, plus the broad
/// index levels.
pub const CREDIT_OAS: &[CatalogEntry] = &[
    ("Rating AAA", "BAMLC0A1CAAA"),
    ("Rating AA", "BAMLC0A2CAA"),
    ("Rating A", "BAMLC0A3CA"),
    ("Rating BBB", "BAMLC0A4CBBB"),
    ("BBB or better", "BAMLC0A0CM"),
    ("High Yield", "BAMLH0A0HYM2EY"),
    ("Investment Grade", "BAMLC0A4CBBBEY"),
];

/// US index semi-annual yield-to-worst by rating band.
pub const CREDIT_YTW: &[CatalogEntry] = &[
    ("Rating AAA YTW", "BAMLC0A1CAAASYTW"),
    ("Rating AA YTW", "BAMLC0A2CAASYTW"),
    ("Rating A YTW", "BAMLC0A3CASYTW"),
    ("Rating BBB YTW", "BAMLC0A4CBBBSYTW"),
    ("High Yield YTW", "BAMLH0A0HYM2SYTW"),
];

/// ICE emerging-markets corporate yield-to-worst by economic zone.
pub const EM_YTW: &[CatalogEntry] = &[
    ("Global", "BAMLEMUBCRPIUSSYTW"),
    ("Euro", "BAMLEMEBCRPIESYTW"),
    ("Latin America", "BAMLEMRLCRPILASYTW"),
    ("Asia", "BAMLEMRACRPIASIASYTW"),
    ("EMEA", "BAMLEMRECRPIEMEASYTW"),
];

/// Treasury market yields and inflation expectations.
pub const RATES: &[CatalogEntry] = &[
    ("10-Year Treasury Market Yield", "DGS10"),
    ("2-Year Treasury Market Yield", "DGS2"),
    ("5-Year Inflation Expectation", "T5YIFR"),
    ("Rating AAA Corporate Yield", "BAMLC0A1CAAAEY"),
];

/// US labor-market indicators.
pub const LABOR_MARKET: &[CatalogEntry] = &[
    ("Total Nonfarm Payrolls", "PAYEMS"),
    ("Unemployment Rate", "UNRATE"),
    ("Labor Force Participation Rate", "CIVPART"),
    ("Job Openings (JOLTS)", "JTSJOL"),
    ("Average Hourly Earnings (Total Private)", "CES0500000003"),
    ("U-6 Unemployment Rate", "U6RATE"),
    ("Quits Rate (JOLTS)", "JTSQUR"),
    ("Initial Claims (ICSA)", "ICSA"),
];

/// Equity benchmark tickers (Yahoo symbols).
pub const EQUITY_TICKERS: &[CatalogEntry] = &[
    ("VIX", "^VIX"),
    ("S&P 500", "^GSPC"),
    ("TLT (Long-Term Treasuries)", "TLT"),
    ("IEF (Mid-Term Treasuries)", "IEF"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const GROUPS: &[&[CatalogEntry]] = &[
        CREDIT_OAS,
        CREDIT_YTW,
        EM_YTW,
        RATES,
        LABOR_MARKET,
        EQUITY_TICKERS,
    ];

    #[test]
    fn labels_are_unique_within_each_group() {
        for group in GROUPS {
            let labels: HashSet<&str> = group.iter().map(|&(label, _)| label).collect();
            assert_eq!(labels.len(), group.len());
        }
    }

    #[test]
    fn codes_are_unique_within_each_group() {
        for group in GROUPS {
            let codes: HashSet<&str> = group.iter().map(|&(_, code)| code).collect();
            assert_eq!(codes.len(), group.len());
        }
    }
}
