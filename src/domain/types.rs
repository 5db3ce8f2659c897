//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during a screen run
//! - exported to JSON/CSV
//! - rendered by the terminal report code without extra conversions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Price trend direction between the two most recent observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
}

impl Trend {
    /// Derive trend from a percent change.
    ///
    /// Zero change (including the guarded previous-price-of-zero case) reports
    /// `Rising`, matching the upstream feed's convention of showing flat prices
    /// with an up arrow. Callers that need a stricter read should look at the
    /// change value directly.
    pub fn from_change(change_pct: f64) -> Self {
        if change_pct < 0.0 {
            Trend::Falling
        } else {
            Trend::Rising
        }
    }

    /// Arrow label for terminal output.
    pub fn arrow(self) -> &'static str {
        match self {
            Trend::Rising => "▲",
            Trend::Falling => "▼",
        }
    }
}

/// Coarse bucket summarizing recent price dispersion.
///
/// Classified from the coefficient of variation of the history window; see
/// `market::enrich::volatility_class` for the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityClass {
    Low,
    Medium,
    High,
}

impl VolatilityClass {
    pub fn display_name(self) -> &'static str {
        match self {
            VolatilityClass::Low => "low",
            VolatilityClass::Medium => "medium",
            VolatilityClass::High => "high",
        }
    }
}

/// Derived recommendation combining trend direction and magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SellSignal {
    /// Rising and already past the sell-now cut point.
    Now,
    /// Neither clearly rising past the cut nor falling.
    SellSoon,
    /// Falling; holding is likely better.
    Wait,
}

impl SellSignal {
    pub fn display_name(self) -> &'static str {
        match self {
            SellSignal::Now => "sell now",
            SellSignal::SellSoon => "sell soon",
            SellSignal::Wait => "wait",
        }
    }
}

/// Whether the current price sits above or below the government floor price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MspStatus {
    Above,
    Below,
}

/// Comparison of the current price against the minimum support price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MspComparison {
    pub status: MspStatus,
    /// The MSP itself (₹ per quintal).
    pub msp: f64,
    /// Signed `price - msp`.
    pub delta: f64,
}

/// A single dated price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// A current market price with its recent history.
///
/// Construction invariants (held by `from_history` and by the demo dataset):
///
/// - `history` is chronological and non-empty
/// - the last history entry's price equals `price`
/// - the sign of `change_pct` agrees with `trend` (zero counts as rising)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub commodity: String,
    pub market: String,
    /// Unit of sale, e.g. "quintal" or "kg".
    pub unit: String,
    /// Most recent modal price.
    pub price: f64,
    /// Percent change vs the previous observation (0 when there is none).
    pub change_pct: f64,
    pub trend: Trend,
    pub last_updated: NaiveDate,
    /// Chronological recent observations, most recent last.
    pub history: Vec<PricePoint>,
}

impl PriceRecord {
    /// Build a record from a chronological history, deriving price, change,
    /// and trend so the construction invariants hold.
    ///
    /// Returns `None` for an empty history.
    pub fn from_history(
        commodity: impl Into<String>,
        market: impl Into<String>,
        unit: impl Into<String>,
        history: Vec<PricePoint>,
    ) -> Option<Self> {
        let last = *history.last()?;
        let previous = if history.len() >= 2 {
            Some(history[history.len() - 2].price)
        } else {
            None
        };
        let change_pct = match previous {
            Some(prev) => percent_change(last.price, prev),
            None => 0.0,
        };
        Some(Self {
            commodity: commodity.into(),
            market: market.into(),
            unit: unit.into(),
            price: last.price,
            change_pct,
            trend: Trend::from_change(change_pct),
            last_updated: last.date,
            history,
        })
    }
}

/// Percent change of `current` relative to `previous`.
///
/// Guards the division: a zero previous price yields 0 rather than a NaN or
/// infinity leaking into downstream signals.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Percent deltas of the current price vs fixed look-backs into the history.
///
/// Offsets are clamped to the oldest entry when the history is shorter, so
/// with the feed's usual 5-point window the week and month deltas both read
/// against the oldest point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparisons {
    pub vs_yesterday: f64,
    pub vs_last_week: f64,
    pub vs_last_month: f64,
}

/// A `PriceRecord` plus derived decision-support signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPriceRecord {
    pub record: PriceRecord,
    pub volatility: VolatilityClass,
    /// Absent when the commodity has no MSP entry.
    pub msp: Option<MspComparison>,
    pub sell_signal: SellSignal,
    pub comparisons: Comparisons,
}

/// Advisory cohort identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryKind {
    Gainers,
    Decliners,
    Stable,
}

impl AdvisoryKind {
    /// One-line guidance shown with the cohort.
    pub fn headline(self) -> &'static str {
        match self {
            AdvisoryKind::Gainers => "Strong gainers — consider selling while prices hold.",
            AdvisoryKind::Decliners => "Declining — holding may avoid selling into weakness.",
            AdvisoryKind::Stable => "Stable — no urgency either way.",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AdvisoryKind::Gainers => "gainers",
            AdvisoryKind::Decliners => "decliners",
            AdvisoryKind::Stable => "stable",
        }
    }
}

/// A cohort advisory over the screened commodities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub commodities: Vec<String>,
}

/// Net-proceeds estimate for selling at one market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitEstimate {
    pub market: String,
    pub distance_km: f64,
    pub price_per_unit: f64,
    pub quantity: f64,
    pub cost_per_km: f64,
    /// `price_per_unit * quantity - distance_km * cost_per_km`.
    pub net_profit: f64,
    /// True for the top-ranked entry only.
    pub best_choice: bool,
}

/// A geographic coordinate (decimal degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// Optional query filters forwarded to the price feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceFilters {
    pub state: Option<String>,
    pub district: Option<String>,
    pub market: Option<String>,
    /// Feed page size.
    pub limit: usize,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    pub filters: PriceFilters,
    /// Case-insensitive commodity substring filter.
    pub query: Option<String>,
    /// Skip the live feed entirely and use the built-in dataset.
    pub demo_only: bool,

    /// Sell-now cut point (percent change); rising records past this read
    /// "sell now". Single constant reconciling the divergent cut points the
    /// original UI used.
    pub sell_now_pct: f64,

    /// Origin city for distance resolution.
    pub origin: String,
    /// Explicit origin coordinate, preferred over the city tables when set.
    pub origin_coord: Option<Coord>,
    /// Opt in to the AI distance estimator for cities the tables miss.
    pub use_ai: bool,

    pub quantity: f64,
    pub cost_per_km: f64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            filters: PriceFilters {
                limit: 100,
                ..PriceFilters::default()
            },
            query: None,
            demo_only: false,
            sell_now_pct: 5.0,
            origin: "delhi".to_string(),
            origin_coord: None,
            use_ai: false,
            quantity: 10.0,
            cost_per_km: 15.0,
        }
    }
}
