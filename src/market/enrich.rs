//! Per-record enrichment: turn a `PriceRecord` into decision-support signals.
//!
//! Everything in here is a pure function of its inputs; enriching the same
//! records twice produces identical output.

use crate::data::msp;
use crate::domain::{
    percent_change, Comparisons, EnrichedPriceRecord, MspComparison, MspStatus, PricePoint,
    PriceRecord, SellSignal, Trend, VolatilityClass,
};

/// Volatility thresholds on the coefficient of variation (std dev / mean) of
/// the history window. Monotonic: higher dispersion never reads as a lower
/// class.
const HIGH_CV: f64 = 0.10;
const MEDIUM_CV: f64 = 0.04;

/// Look-back offsets (positions from the end of the history) for the
/// comparison deltas. The feed keeps 5 points, so week and month usually
/// clamp to the oldest entry.
const YESTERDAY_OFFSET: usize = 1;
const WEEK_OFFSET: usize = 7;
const MONTH_OFFSET: usize = 30;

/// Enrich a batch of records with derived signals.
pub fn enrich(records: &[PriceRecord], sell_now_pct: f64) -> Vec<EnrichedPriceRecord> {
    records
        .iter()
        .map(|r| enrich_record(r, sell_now_pct))
        .collect()
}

/// Enrich one record.
pub fn enrich_record(record: &PriceRecord, sell_now_pct: f64) -> EnrichedPriceRecord {
    EnrichedPriceRecord {
        volatility: volatility_class(&record.history),
        msp: msp_comparison(&record.commodity, record.price),
        sell_signal: sell_signal(record.trend, record.change_pct, sell_now_pct),
        comparisons: comparisons(&record.history, record.price),
        record: record.clone(),
    }
}

/// Classify price dispersion from the coefficient of variation.
///
/// Histories with fewer than 2 points (or a non-positive mean) cannot show
/// dispersion and read as `Low`.
pub fn volatility_class(history: &[PricePoint]) -> VolatilityClass {
    if history.len() < 2 {
        return VolatilityClass::Low;
    }

    let n = history.len() as f64;
    let mean = history.iter().map(|p| p.price).sum::<f64>() / n;
    if !(mean.is_finite() && mean > 0.0) {
        return VolatilityClass::Low;
    }

    // Sample variance (n-1 denominator).
    let variance = history
        .iter()
        .map(|p| (p.price - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    let cv = variance.sqrt() / mean;

    if cv > HIGH_CV {
        VolatilityClass::High
    } else if cv > MEDIUM_CV {
        VolatilityClass::Medium
    } else {
        VolatilityClass::Low
    }
}

/// Compare the current price against the MSP table, if the commodity has an
/// entry. A price exactly at the floor reads `Above` (delta 0).
pub fn msp_comparison(commodity: &str, price: f64) -> Option<MspComparison> {
    let floor = msp::msp_for(commodity)?;
    Some(MspComparison {
        status: if price >= floor {
            MspStatus::Above
        } else {
            MspStatus::Below
        },
        msp: floor,
        delta: price - floor,
    })
}

/// Total sell-signal classification over {trend, change}.
///
/// Rising past the cut point: sell now. Falling: wait. Everything else,
/// including rising exactly at the cut: sell soon.
pub fn sell_signal(trend: Trend, change_pct: f64, sell_now_pct: f64) -> SellSignal {
    match trend {
        Trend::Rising if change_pct > sell_now_pct => SellSignal::Now,
        Trend::Falling => SellSignal::Wait,
        _ => SellSignal::SellSoon,
    }
}

/// Percent deltas vs fixed look-backs, clamping to the oldest entry when the
/// history is shorter than the offset.
pub fn comparisons(history: &[PricePoint], current: f64) -> Comparisons {
    let delta = |offset: usize| -> f64 {
        if history.is_empty() {
            return 0.0;
        }
        let idx = history.len().saturating_sub(1).saturating_sub(offset);
        percent_change(current, history[idx].price)
    };

    Comparisons {
        vs_yesterday: delta(YESTERDAY_OFFSET),
        vs_last_week: delta(WEEK_OFFSET),
        vs_last_month: delta(MONTH_OFFSET),
    }
}
