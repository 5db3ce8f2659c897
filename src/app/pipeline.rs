//! Shared screen pipeline used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch (or demo) -> query filter -> enrich -> advise -> rank
//!
//! The subcommands then focus on presentation (which table to print).

use crate::data::{search_prices, PriceRepository};
use crate::domain::{Advisory, EnrichedPriceRecord, ProfitEstimate, ScreenConfig};
use crate::geo::ai::AiDistanceClient;
use crate::geo::{AiDistances, OfflineDistances};
use crate::market;
use crate::profit;

/// All computed outputs of a single screen run.
#[derive(Debug, Clone)]
pub struct ScreenOutput {
    pub enriched: Vec<EnrichedPriceRecord>,
    pub advisories: Vec<Advisory>,
}

/// Execute the screen pipeline against the configured source.
///
/// Infallible by design: every failure below the repository degrades to the
/// demo dataset, and everything above it is pure.
pub fn run_screen(config: &ScreenConfig) -> ScreenOutput {
    let repo = if config.demo_only {
        PriceRepository::demo_only()
    } else {
        PriceRepository::from_env()
    };
    run_screen_with(&repo, config)
}

/// Execute the pipeline with an injected repository (used by tests).
pub fn run_screen_with(repo: &PriceRepository, config: &ScreenConfig) -> ScreenOutput {
    let mut records = repo.fetch_market_prices(&config.filters);
    if let Some(query) = &config.query {
        records = search_prices(&records, query);
    }

    let enriched = market::enrich(&records, config.sell_now_pct);
    let advisories = market::advise(&enriched);

    ScreenOutput {
        enriched,
        advisories,
    }
}

/// Rank markets for one commodity, choosing the distance strategy from the
/// config: offline tables by default, haversine when an origin coordinate is
/// set, and the AI tier only when explicitly opted in (and configured).
pub fn rank_markets_for(
    config: &ScreenConfig,
    commodity: &str,
    enriched: &[EnrichedPriceRecord],
) -> Vec<ProfitEstimate> {
    let offline = match config.origin_coord {
        Some(coord) => OfflineDistances::with_origin_coord(coord),
        None => OfflineDistances::new(),
    };

    if config.use_ai {
        match AiDistanceClient::from_env() {
            Ok(client) => {
                let needle = commodity.trim().to_lowercase();
                let markets: Vec<String> = enriched
                    .iter()
                    .filter(|r| r.record.commodity.to_lowercase() == needle)
                    .map(|r| r.record.market.clone())
                    .collect();
                let source = AiDistances::resolve(&client, offline, &config.origin, &markets);
                return profit::rank_markets(
                    enriched,
                    commodity,
                    config.quantity,
                    config.cost_per_km,
                    &config.origin,
                    &source,
                );
            }
            Err(err) => {
                eprintln!("warning: {err} Falling back to offline distances.");
            }
        }
    }

    profit::rank_markets(
        enriched,
        commodity,
        config.quantity,
        config.cost_per_km,
        &config.origin,
        &offline,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SellSignal;

    fn demo_config() -> ScreenConfig {
        ScreenConfig {
            demo_only: true,
            ..ScreenConfig::default()
        }
    }

    #[test]
    fn demo_screen_produces_enriched_records() {
        let repo = PriceRepository::demo_only();
        let run = run_screen_with(&repo, &demo_config());
        assert!(!run.enriched.is_empty());
        // Falling demo records must read "wait".
        let onion = run
            .enriched
            .iter()
            .find(|r| r.record.commodity == "Onion")
            .unwrap();
        assert_eq!(onion.sell_signal, SellSignal::Wait);
    }

    #[test]
    fn query_filter_narrows_the_screen() {
        let repo = PriceRepository::demo_only();
        let config = ScreenConfig {
            query: Some("wheat".to_string()),
            ..demo_config()
        };
        let run = run_screen_with(&repo, &config);
        assert_eq!(run.enriched.len(), 1);
        assert_eq!(run.enriched[0].record.commodity, "Wheat");
    }

    #[test]
    fn ranking_uses_offline_distances_end_to_end() {
        let repo = PriceRepository::demo_only();
        let config = demo_config();
        let run = run_screen_with(&repo, &config);

        let ranking = rank_markets_for(&config, "Soybean", &run.enriched);
        assert_eq!(ranking.len(), 1);
        let est = &ranking[0];
        assert!(est.best_choice);
        // Indore Krishi Upaj Mandi resolves to 810 km from Delhi.
        assert_eq!(est.distance_km, 810.0);
        assert_eq!(est.net_profit, 4420.0 * 10.0 - 810.0 * 15.0);
    }

    #[test]
    fn ranking_unknown_commodity_is_empty() {
        let repo = PriceRepository::demo_only();
        let config = demo_config();
        let run = run_screen_with(&repo, &config);
        assert!(rank_markets_for(&config, "Saffron", &run.enriched).is_empty());
    }
}
