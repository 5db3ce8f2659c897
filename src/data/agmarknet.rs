//! AGMARKNET commodity-price feed via the data.gov.in open-data API.
//!
//! The feed is loosely typed: numeric values arrive as strings and field names
//! show up in snake_case or PascalCase depending on the resource revision.
//! Everything is normalized into `domain::PriceRecord` here so the ambiguity
//! never leaks past this module.

use std::collections::HashMap;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{PriceFilters, PricePoint, PriceRecord};
use crate::error::AppError;

const BASE_URL: &str = "https://api.data.gov.in/resource/9ef84268-d588-465a-a308-a864a43d0070";

/// History window kept per commodity (most recent observations).
const HISTORY_LEN: usize = 5;

pub struct AgmarknetClient {
    client: Client,
    api_key: String,
}

impl AgmarknetClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("DATA_GOV_IN_API_KEY")
            .map_err(|_| AppError::new(2, "Missing DATA_GOV_IN_API_KEY in environment (.env)."))?;
        Ok(Self::new(api_key))
    }

    /// Fetch and normalize current prices, newest-first per commodity.
    ///
    /// Errors here are expected to be absorbed by the repository, which falls
    /// back to the demo dataset.
    pub fn fetch_market_prices(&self, filters: &PriceFilters) -> Result<Vec<PriceRecord>, AppError> {
        let rows = self.fetch_raw(filters)?;
        Ok(group_records(rows))
    }

    fn fetch_raw(&self, filters: &PriceFilters) -> Result<Vec<RawRow>, AppError> {
        let limit = if filters.limit == 0 { 100 } else { filters.limit };
        let mut req = self.client.get(BASE_URL).query(&[
            ("api-key", self.api_key.as_str()),
            ("format", "json"),
            ("limit", &limit.to_string()),
            ("offset", "0"),
        ]);

        if let Some(state) = &filters.state {
            req = req.query(&[("filters[state]", state.as_str())]);
        }
        if let Some(district) = &filters.district {
            req = req.query(&[("filters[district]", district.as_str())]);
        }
        if let Some(market) = &filters.market {
            req = req.query(&[("filters[market]", market.as_str())]);
        }

        let resp = req
            .send()
            .map_err(|e| AppError::new(4, format!("AGMARKNET request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("AGMARKNET request failed with status {}.", resp.status()),
            ));
        }

        let body: RecordsResponse = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse AGMARKNET response: {e}")))?;

        Ok(body.records)
    }
}

/// Feed envelope. Only `records` matters; paging metadata is ignored.
#[derive(Debug, Deserialize)]
struct RecordsResponse {
    #[serde(default)]
    records: Vec<RawRow>,
}

/// One raw feed row, tolerating both field-name spellings the resource has
/// shipped over the years.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRow {
    #[serde(default, alias = "Commodity")]
    commodity: Option<String>,
    #[serde(default, alias = "Market")]
    market: Option<String>,
    #[serde(default, alias = "Arrival_Date", alias = "arrival_Date")]
    arrival_date: Option<String>,
    #[serde(default, alias = "Modal_Price", alias = "Modal_price")]
    modal_price: Option<String>,
}

/// A validated feed row.
#[derive(Debug, Clone)]
struct CleanRow {
    commodity: String,
    market: String,
    date: NaiveDate,
    price: f64,
}

/// Group raw rows into one `PriceRecord` per commodity.
///
/// Per commodity: sort observations by arrival date descending, take the most
/// recent as current, and keep the latest `HISTORY_LEN` observations as the
/// chronological history. Change and trend are derived from the last two
/// history points by `PriceRecord::from_history`, which is exactly the
/// current-vs-previous comparison. Rows that fail validation are skipped.
pub fn group_records(rows: Vec<RawRow>) -> Vec<PriceRecord> {
    let mut by_commodity: HashMap<String, Vec<CleanRow>> = HashMap::new();
    for row in rows {
        if let Some(clean) = clean_row(row) {
            by_commodity
                .entry(clean.commodity.to_lowercase())
                .or_default()
                .push(clean);
        }
    }

    let mut out = Vec::with_capacity(by_commodity.len());
    for (_, mut group) in by_commodity {
        // Newest first; stable so same-date rows keep feed order.
        group.sort_by(|a, b| b.date.cmp(&a.date));

        let current = group[0].clone();
        let history: Vec<PricePoint> = group
            .iter()
            .take(HISTORY_LEN)
            .rev()
            .map(|r| PricePoint {
                date: r.date,
                price: r.price,
            })
            .collect();

        if let Some(record) =
            PriceRecord::from_history(current.commodity, current.market, "quintal", history)
        {
            out.push(record);
        }
    }

    // HashMap order is arbitrary; keep output deterministic.
    out.sort_by(|a, b| a.commodity.cmp(&b.commodity));
    out
}

fn clean_row(row: RawRow) -> Option<CleanRow> {
    let commodity = non_empty(row.commodity)?;
    let market = non_empty(row.market)?;
    let date = parse_arrival_date(&non_empty(row.arrival_date)?)?;
    let price = parse_value(&row.modal_price?)?;
    Some(CleanRow {
        commodity,
        market,
        date,
        price,
    })
}

fn non_empty(v: Option<String>) -> Option<String> {
    let v = v?;
    let trimmed = v.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a feed numeric, which arrives as a string and may be blank or "NA".
fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "NA" {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() && v >= 0.0 {
        Some(v)
    } else {
        None
    }
}

/// The feed has shipped both `dd/mm/yyyy` and ISO dates.
fn parse_arrival_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .ok()
}
