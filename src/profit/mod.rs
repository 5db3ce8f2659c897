//! Net-profit ranking of candidate markets.
//!
//! Combines the enriched price list with distance resolution to answer the
//! farmer's actual question: where does selling net the most after transport?

use crate::domain::{EnrichedPriceRecord, ProfitEstimate};
use crate::geo::DistanceSource;

/// Net proceeds of selling `quantity` units at `price_per_unit` after hauling
/// `distance_km` at `cost_per_km`.
///
/// No unit conversion happens here; the caller supplies quantity and price in
/// matching units (the feed quotes ₹/quintal).
pub fn net_profit(price_per_unit: f64, quantity: f64, distance_km: f64, cost_per_km: f64) -> f64 {
    price_per_unit * quantity - distance_km * cost_per_km
}

/// Rank all markets offering `commodity` by net profit, descending.
///
/// Matching is case-insensitive on the commodity name. The sort is stable, so
/// equal-profit markets keep their input order. The top entry is flagged as
/// the best choice.
pub fn rank_markets(
    records: &[EnrichedPriceRecord],
    commodity: &str,
    quantity: f64,
    cost_per_km: f64,
    origin: &str,
    distances: &dyn DistanceSource,
) -> Vec<ProfitEstimate> {
    let needle = commodity.trim().to_lowercase();

    let mut estimates: Vec<ProfitEstimate> = records
        .iter()
        .filter(|r| r.record.commodity.to_lowercase() == needle)
        .map(|r| {
            let distance_km = distances.distance_km(origin, &r.record.market);
            ProfitEstimate {
                market: r.record.market.clone(),
                distance_km,
                price_per_unit: r.record.price,
                quantity,
                cost_per_km,
                net_profit: net_profit(r.record.price, quantity, distance_km, cost_per_km),
                best_choice: false,
            }
        })
        .collect();

    estimates.sort_by(|a, b| {
        b.net_profit
            .partial_cmp(&a.net_profit)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(first) = estimates.first_mut() {
        first.best_choice = true;
    }
    estimates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PricePoint, PriceRecord, Trend};
    use crate::geo::OfflineDistances;
    use crate::market::enrich_record;
    use chrono::NaiveDate;

    fn enriched(commodity: &str, market: &str, price: f64) -> EnrichedPriceRecord {
        let date = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
        let record = PriceRecord {
            commodity: commodity.to_string(),
            market: market.to_string(),
            unit: "quintal".to_string(),
            price,
            change_pct: 0.0,
            trend: Trend::Rising,
            last_updated: date,
            history: vec![PricePoint { date, price }],
        };
        enrich_record(&record, 5.0)
    }

    #[test]
    fn net_profit_formula_is_exact() {
        assert_eq!(net_profit(2100.0, 10.0, 100.0, 15.0), 19500.0);
        assert_eq!(net_profit(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn net_profit_monotonicity() {
        let base = net_profit(2100.0, 10.0, 100.0, 15.0);
        assert!(net_profit(2200.0, 10.0, 100.0, 15.0) > base); // increasing in price
        assert!(net_profit(2100.0, 11.0, 100.0, 15.0) > base); // increasing in quantity
        assert!(net_profit(2100.0, 10.0, 200.0, 15.0) < base); // decreasing in distance
        assert!(net_profit(2100.0, 10.0, 100.0, 20.0) < base); // decreasing in cost
    }

    #[test]
    fn rank_orders_by_net_profit_and_flags_best() {
        let records = vec![
            // Jaipur: 280 km from Delhi; 2000*10 - 280*15 = 15800.
            enriched("Wheat", "Jaipur Mandi", 2000.0),
            // Mumbai: 1400 km; 2300*10 - 1400*15 = 2000.
            enriched("Wheat", "Mumbai APMC", 2300.0),
            // Chandigarh: 250 km; 2050*10 - 250*15 = 16750.
            enriched("Wheat", "Chandigarh Mandi", 2050.0),
            enriched("Onion", "Lasalgaon Mandi", 1200.0),
        ];

        let ranked = rank_markets(&records, "wheat", 10.0, 15.0, "Delhi", &OfflineDistances::new());

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].market, "Chandigarh Mandi");
        assert_eq!(ranked[0].net_profit, 16750.0);
        assert!(ranked[0].best_choice);
        assert_eq!(ranked[1].market, "Jaipur Mandi");
        assert_eq!(ranked[2].market, "Mumbai APMC");
        assert!(!ranked[1].best_choice && !ranked[2].best_choice);
    }

    #[test]
    fn ties_keep_input_order() {
        let records = vec![
            enriched("Wheat", "Sonipat Mandi", 2000.0),
            enriched("Wheat", "Panipat Mandi", 2000.0),
        ];
        // Both towns remap to Delhi (distance 0 from Delhi): identical profit.
        let ranked = rank_markets(&records, "Wheat", 10.0, 15.0, "Delhi", &OfflineDistances::new());
        assert_eq!(ranked[0].market, "Sonipat Mandi");
        assert_eq!(ranked[1].market, "Panipat Mandi");
        assert_eq!(ranked[0].net_profit, ranked[1].net_profit);
    }

    #[test]
    fn unknown_commodity_ranks_nothing() {
        let records = vec![enriched("Wheat", "Jaipur Mandi", 2000.0)];
        assert!(rank_markets(&records, "Rice", 10.0, 15.0, "Delhi", &OfflineDistances::new()).is_empty());
    }
}
