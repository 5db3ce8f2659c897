//! Price repository with never-fail semantics.
//!
//! The screen must always have numbers to show: any feed failure (missing API
//! key, network error, malformed payload, empty result) degrades to the
//! injected demo dataset with a warning on stderr. Nothing in here returns an
//! error to the caller.

use crate::data::agmarknet::AgmarknetClient;
use crate::data::demo;
use crate::domain::{PriceFilters, PriceRecord};

pub struct PriceRepository {
    fallback: Vec<PriceRecord>,
    client: Option<AgmarknetClient>,
}

impl PriceRepository {
    /// Live feed when `DATA_GOV_IN_API_KEY` is configured, demo otherwise.
    pub fn from_env() -> Self {
        match AgmarknetClient::from_env() {
            Ok(client) => Self {
                fallback: demo::demo_records(),
                client: Some(client),
            },
            Err(err) => {
                eprintln!("warning: {err} Using demo prices.");
                Self::demo_only()
            }
        }
    }

    /// Demo dataset only; never touches the network.
    pub fn demo_only() -> Self {
        Self::with_dataset(demo::demo_records())
    }

    /// Inject an explicit dataset (used by tests and by callers that want a
    /// different fallback table).
    pub fn with_dataset(fallback: Vec<PriceRecord>) -> Self {
        Self {
            fallback,
            client: None,
        }
    }

    /// Fetch current prices. Always returns a non-empty list when the fallback
    /// dataset is non-empty; never returns an error.
    pub fn fetch_market_prices(&self, filters: &PriceFilters) -> Vec<PriceRecord> {
        let Some(client) = &self.client else {
            return self.fallback.clone();
        };

        match client.fetch_market_prices(filters) {
            Ok(records) if !records.is_empty() => records,
            Ok(_) => {
                eprintln!("warning: AGMARKNET returned no usable records. Using demo prices.");
                self.fallback.clone()
            }
            Err(err) => {
                eprintln!("warning: {err} Using demo prices.");
                self.fallback.clone()
            }
        }
    }
}

/// Case-insensitive substring match on commodity name.
pub fn search_prices(records: &[PriceRecord], query: &str) -> Vec<PriceRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| r.commodity.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceFilters;

    #[test]
    fn no_client_serves_injected_dataset() {
        let repo = PriceRepository::demo_only();
        let records = repo.fetch_market_prices(&PriceFilters::default());
        assert!(!records.is_empty());
        assert_eq!(records, repo.fetch_market_prices(&PriceFilters::default()));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let repo = PriceRepository::demo_only();
        let records = repo.fetch_market_prices(&PriceFilters::default());

        let hits = search_prices(&records, "whe");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].commodity, "Wheat");

        let hits = search_prices(&records, "WHEAT");
        assert_eq!(hits.len(), 1);

        assert!(search_prices(&records, "plutonium").is_empty());
    }

    #[test]
    fn empty_query_returns_everything() {
        let records = crate::data::demo::demo_records();
        assert_eq!(search_prices(&records, "  ").len(), records.len());
    }
}
