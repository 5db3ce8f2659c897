//! Distance resolution between a farmer's location and candidate markets.
//!
//! Resolution is tiered by cost:
//!
//! 1. offline pairwise table (instant) — `cities::city_distance`
//! 2. nearest-major-city remap and retry (instant) — `cities::nearest_major_city`
//! 3. optional AI batch estimate (slow, approximate, opt-in) — `ai`
//! 4. constant fallback (always succeeds)
//!
//! When the caller supplies an explicit origin coordinate, the haversine path
//! takes precedence over the road tables for cities we have coordinates for.

pub mod ai;
pub mod cities;
pub mod haversine;

use std::collections::HashMap;

use crate::domain::Coord;

pub use cities::{city_distance, is_major_city, nearest_major_city};
pub use haversine::{coords_for, haversine_km};

/// Flat fallback when nothing resolves.
pub const DEFAULT_DISTANCE_KM: f64 = 50.0;
/// Fallback for markets that advertise themselves as local.
pub const LOCAL_DISTANCE_KM: f64 = 15.0;

/// Known market-name suffixes, longest first so "Sabzi Mandi" wins over "Mandi".
const MARKET_SUFFIXES: &[&str] = &[
    "krishi upaj mandi",
    "sabzi mandi",
    "wholesale market",
    "apmc",
    "mandi",
    "market",
];

/// Strip known market suffixes and take the leading token as the city name.
///
/// Returns a normalized (trimmed, lowercase) city; an empty string when the
/// market name is nothing but suffix.
pub fn extract_city_from_market(market: &str) -> String {
    let mut name = market.trim().to_lowercase();
    loop {
        let mut stripped = false;
        for suffix in MARKET_SUFFIXES {
            if name.ends_with(suffix) {
                name.truncate(name.len() - suffix.len());
                name = name.trim_end().to_string();
                stripped = true;
                break;
            }
        }
        if !stripped {
            break;
        }
    }
    name.split_whitespace().next().unwrap_or("").to_string()
}

/// A total distance resolver: given an origin city and a market name, always
/// produces a distance in km.
pub trait DistanceSource {
    fn distance_km(&self, origin: &str, market: &str) -> f64;
}

/// Deterministic offline resolver (tiers 1, 2, and 4). The default strategy;
/// tests run only against this.
#[derive(Debug, Clone, Default)]
pub struct OfflineDistances {
    origin_coord: Option<Coord>,
}

impl OfflineDistances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefer haversine from this coordinate when the market's city has a
    /// known coordinate.
    pub fn with_origin_coord(coord: Coord) -> Self {
        Self {
            origin_coord: Some(coord),
        }
    }

    /// Table tiers only: haversine (if an origin coordinate is set), then
    /// direct/reverse pairwise lookup, then nearest-major remap and retry.
    /// `None` means the caller should fall back to a constant (or the AI tier).
    pub fn lookup(&self, origin: &str, market: &str) -> Option<f64> {
        let city = extract_city_from_market(market);
        if city.is_empty() {
            return None;
        }

        if let Some(from) = self.origin_coord {
            let market_coord =
                coords_for(&city).or_else(|| nearest_major_city(&city).and_then(|m| coords_for(&m)));
            if let Some(to) = market_coord {
                return Some(haversine_km(from, to));
            }
        }

        if let Some(km) = city_distance(origin, &city) {
            return Some(km);
        }

        let origin_major = nearest_major_city(origin)?;
        let city_major = nearest_major_city(&city)?;
        city_distance(&origin_major, &city_major)
    }
}

/// Constant fallback distance for a market nothing else resolved.
pub fn default_distance(market: &str) -> f64 {
    if market.to_lowercase().contains("local") {
        LOCAL_DISTANCE_KM
    } else {
        DEFAULT_DISTANCE_KM
    }
}

impl DistanceSource for OfflineDistances {
    fn distance_km(&self, origin: &str, market: &str) -> f64 {
        self.lookup(origin, market)
            .unwrap_or_else(|| default_distance(market))
    }
}

/// Offline resolver backed by AI estimates for the cities the tables miss.
///
/// The estimate map is filled once, up front, from a single batch prompt (see
/// `ai::AiDistanceClient::estimate_batch`); resolution itself stays pure.
pub struct AiDistances {
    offline: OfflineDistances,
    estimates: HashMap<String, f64>,
}

impl AiDistances {
    /// Resolve the given markets, asking the AI client only about cities the
    /// offline tiers cannot place. Any AI failure just leaves the estimate map
    /// sparse and the constant fallback takes over.
    pub fn resolve(
        client: &ai::AiDistanceClient,
        offline: OfflineDistances,
        origin: &str,
        markets: &[String],
    ) -> Self {
        let mut unresolved: Vec<String> = markets
            .iter()
            .filter(|m| offline.lookup(origin, m).is_none())
            .map(|m| extract_city_from_market(m))
            .filter(|c| !c.is_empty())
            .collect();
        unresolved.sort();
        unresolved.dedup();

        let estimates = if unresolved.is_empty() {
            HashMap::new()
        } else {
            client.estimate_batch(origin, &unresolved)
        };

        Self { offline, estimates }
    }

    #[cfg(test)]
    fn with_estimates(offline: OfflineDistances, estimates: HashMap<String, f64>) -> Self {
        Self { offline, estimates }
    }
}

impl DistanceSource for AiDistances {
    fn distance_km(&self, origin: &str, market: &str) -> f64 {
        if let Some(km) = self.offline.lookup(origin, market) {
            return km;
        }
        let city = extract_city_from_market(market);
        self.estimates
            .get(&city)
            .copied()
            .unwrap_or_else(|| default_distance(market))
    }
}
