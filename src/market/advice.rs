//! Whole-list advisory cohorts.
//!
//! Classifies the screened commodities into gainers, decliners, and stable
//! names. A commodity lands in at most one cohort (first matching rule wins),
//! and a mid-band mover (e.g. +3%) may land in none.

use crate::domain::{Advisory, AdvisoryKind, EnrichedPriceRecord};

/// Change cut for the gainer cohort. Deliberately stricter than the sell-now
/// signal; they answer different questions.
const GAINER_PCT: f64 = 10.0;
const DECLINER_PCT: f64 = -5.0;
const STABLE_BAND_PCT: f64 = 2.0;

/// Build cohort advisories from enriched records. Empty cohorts are omitted;
/// cohort order is gainers, decliners, stable.
pub fn advise(records: &[EnrichedPriceRecord]) -> Vec<Advisory> {
    let mut gainers = Vec::new();
    let mut decliners = Vec::new();
    let mut stable = Vec::new();

    for rec in records {
        let change = rec.record.change_pct;
        let name = rec.record.commodity.clone();
        if change > GAINER_PCT {
            gainers.push(name);
        } else if change < DECLINER_PCT {
            decliners.push(name);
        } else if change.abs() < STABLE_BAND_PCT {
            stable.push(name);
        }
    }

    [
        (AdvisoryKind::Gainers, gainers),
        (AdvisoryKind::Decliners, decliners),
        (AdvisoryKind::Stable, stable),
    ]
    .into_iter()
    .filter(|(_, commodities)| !commodities.is_empty())
    .map(|(kind, commodities)| Advisory { kind, commodities })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PricePoint, PriceRecord, Trend};
    use crate::market::enrich_record;
    use chrono::NaiveDate;

    fn record_with_change(commodity: &str, change_pct: f64) -> EnrichedPriceRecord {
        let date = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
        let record = PriceRecord {
            commodity: commodity.to_string(),
            market: "Test Mandi".to_string(),
            unit: "quintal".to_string(),
            price: 1000.0,
            change_pct,
            trend: Trend::from_change(change_pct),
            last_updated: date,
            history: vec![PricePoint { date, price: 1000.0 }],
        };
        enrich_record(&record, 5.0)
    }

    #[test]
    fn cohorts_are_disjoint_by_first_match() {
        let records = vec![
            record_with_change("Tomato", 12.0),
            record_with_change("Onion", -8.0),
            record_with_change("Potato", 0.5),
            record_with_change("Wheat", 3.0), // mid-band: no cohort
        ];
        let advisories = advise(&records);

        assert_eq!(advisories.len(), 3);
        assert_eq!(advisories[0].kind, AdvisoryKind::Gainers);
        assert_eq!(advisories[0].commodities, vec!["Tomato"]);
        assert_eq!(advisories[1].kind, AdvisoryKind::Decliners);
        assert_eq!(advisories[1].commodities, vec!["Onion"]);
        assert_eq!(advisories[2].kind, AdvisoryKind::Stable);
        assert_eq!(advisories[2].commodities, vec!["Potato"]);

        // No commodity appears twice across cohorts.
        let mut all: Vec<&String> = advisories.iter().flat_map(|a| &a.commodities).collect();
        all.sort();
        let before = all.len();
        all.dedup();
        assert_eq!(all.len(), before);
    }

    #[test]
    fn empty_cohorts_are_omitted() {
        let advisories = advise(&[record_with_change("Tomato", 15.0)]);
        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].kind, AdvisoryKind::Gainers);
    }

    #[test]
    fn boundary_changes_fall_out_of_cohorts() {
        // Exactly at the cuts: none of the strict comparisons match except stable.
        let advisories = advise(&[
            record_with_change("A", 10.0), // not a gainer (strictly greater required)
            record_with_change("B", -5.0), // not a decliner
            record_with_change("C", 2.0),  // not stable (strictly less required)
        ]);
        assert!(advisories.is_empty());
    }

    #[test]
    fn no_records_no_advisories() {
        assert!(advise(&[]).is_empty());
    }
}
