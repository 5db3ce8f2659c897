//! Built-in demo dataset.
//!
//! This is the degrade target for every feed failure (missing key, network,
//! malformed payload), so the screen always has something to show. Records are
//! built through `PriceRecord::from_history`, which derives price, change, and
//! trend from the history — the construction invariants cannot drift out of
//! sync with hand-typed numbers.

use chrono::NaiveDate;

use crate::domain::{PricePoint, PriceRecord};

/// The demo dataset's as-of date (fixed so tests are deterministic).
const ASOF: (i32, u32, u32) = (2025, 6, 6);

fn history(prices: &[f64]) -> Vec<PricePoint> {
    let (y, m, last_day) = ASOF;
    // Walk back one day per point, clamping at the 1st of the month so an
    // over-long seed cannot underflow the day number.
    let start_day = last_day
        .saturating_sub(prices.len() as u32)
        .saturating_add(1)
        .max(1);
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| PricePoint {
            date: NaiveDate::from_ymd_opt(y, m, (start_day + i as u32).min(last_day))
                .unwrap_or_else(|| NaiveDate::from_ymd_opt(y, m, last_day).unwrap()),
            price,
        })
        .collect()
}

/// Fixed demo prices (₹/quintal) across a spread of mandis and trends.
pub fn demo_records() -> Vec<PriceRecord> {
    let seed: &[(&str, &str, &[f64])] = &[
        ("Wheat", "Azadpur Mandi", &[1950.0, 2000.0, 2050.0, 2080.0, 2100.0]),
        ("Rice", "Karnal Mandi", &[3050.0, 3080.0, 3100.0, 3150.0, 3200.0]),
        ("Onion", "Lasalgaon Mandi", &[1400.0, 1350.0, 1300.0, 1250.0, 1200.0]),
        ("Potato", "Agra Mandi", &[1100.0, 1105.0, 1102.0, 1108.0, 1110.0]),
        ("Tomato", "Kolar APMC", &[1800.0, 2400.0, 2100.0, 2900.0, 2600.0]),
        ("Soybean", "Indore Krishi Upaj Mandi", &[4300.0, 4350.0, 4400.0, 4380.0, 4420.0]),
        ("Cotton", "Rajkot Market", &[6900.0, 6950.0, 7000.0, 7100.0, 7200.0]),
        ("Mustard", "Jaipur Mandi", &[5400.0, 5380.0, 5350.0, 5300.0, 5250.0]),
    ];

    seed.iter()
        .filter_map(|&(commodity, market, prices)| {
            PriceRecord::from_history(commodity, market, "quintal", history(prices))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Trend;

    #[test]
    fn demo_records_hold_invariants() {
        let records = demo_records();
        assert!(!records.is_empty());
        for rec in &records {
            assert!(rec.history.len() >= 2, "{}: needs history for trend", rec.commodity);
            assert_eq!(
                rec.history.last().unwrap().price,
                rec.price,
                "{}: last history point must equal price",
                rec.commodity
            );
            assert!(
                rec.history.windows(2).all(|w| w[0].date < w[1].date),
                "{}: history must be chronological",
                rec.commodity
            );
            // Trend sign agrees with change (zero counts as rising).
            match rec.trend {
                Trend::Rising => assert!(rec.change_pct >= 0.0, "{}", rec.commodity),
                Trend::Falling => assert!(rec.change_pct < 0.0, "{}", rec.commodity),
            }
        }
    }

    #[test]
    fn history_helper_tolerates_odd_seed_lengths() {
        assert!(history(&[]).is_empty());

        // Longer than the days available before the as-of date: days clamp
        // instead of underflowing, and the newest point stays on the as-of day.
        let long: Vec<f64> = (0..10).map(|i| 1000.0 + i as f64).collect();
        let points = history(&long);
        assert_eq!(points.len(), 10);
        assert!(points.windows(2).all(|w| w[0].date <= w[1].date));
        let (y, m, d) = ASOF;
        assert_eq!(points.last().unwrap().date, NaiveDate::from_ymd_opt(y, m, d).unwrap());
    }

    #[test]
    fn demo_covers_both_trends() {
        let records = demo_records();
        assert!(records.iter().any(|r| r.trend == Trend::Rising));
        assert!(records.iter().any(|r| r.trend == Trend::Falling));
    }
}
