//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - fetches and enriches prices (degrading to demo data on any feed failure)
//! - prints tables/advisories/rankings
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, PricesArgs, RankArgs, ScreenArgs};
use crate::domain::{Coord, PriceFilters, ScreenConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `mandi` binary.
pub fn run() -> Result<(), AppError> {
    // We want `mandi` and `mandi -q wheat` to behave like `mandi prices ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Prices(args) => handle_prices(args),
        Command::Advice(args) => handle_advice(args),
        Command::Rank(args) => handle_rank(args),
    }
}

fn handle_prices(args: PricesArgs) -> Result<(), AppError> {
    let config = screen_config_from_args(&args.screen);
    let run = pipeline::run_screen(&config);
    println!("{}", crate::report::format_price_table(&run.enriched, &config));

    if let Some(path) = &args.export {
        crate::io::export::write_prices_csv(path, &run.enriched)?;
    }

    Ok(())
}

fn handle_advice(args: ScreenArgs) -> Result<(), AppError> {
    let config = screen_config_from_args(&args);
    let run = pipeline::run_screen(&config);
    println!("{}", crate::report::format_advice(&run.advisories));
    Ok(())
}

fn handle_rank(args: RankArgs) -> Result<(), AppError> {
    let mut config = screen_config_from_args(&args.screen);
    config.quantity = args.quantity;
    config.cost_per_km = args.cost_per_km;
    config.origin = args.origin.trim().to_lowercase();
    config.use_ai = args.ai;
    config.origin_coord = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => Some(Coord { lat, lon }),
        (None, None) => None,
        _ => return Err(AppError::new(2, "--lat and --lon must be given together.")),
    };

    let run = pipeline::run_screen(&config);
    let ranking = pipeline::rank_markets_for(&config, &args.commodity, &run.enriched);

    println!(
        "{}",
        crate::report::format_rankings(&ranking, &args.commodity, &config)
    );

    if let Some(path) = &args.export {
        crate::io::export::write_rankings_json(path, &ranking)?;
    }

    Ok(())
}

pub fn screen_config_from_args(args: &ScreenArgs) -> ScreenConfig {
    ScreenConfig {
        filters: PriceFilters {
            state: args.state.clone(),
            district: args.district.clone(),
            market: args.market.clone(),
            limit: args.limit,
        },
        query: args.query.clone(),
        demo_only: args.demo,
        sell_now_pct: args.sell_threshold,
        ..ScreenConfig::default()
    }
}

/// Rewrite argv so `mandi` defaults to `mandi prices`.
///
/// Rules:
/// - `mandi`                    -> `mandi prices`
/// - `mandi -q wheat ...`       -> `mandi prices -q wheat ...`
/// - `mandi --help/--version`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("prices".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "prices" | "advice" | "rank");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "prices flags".
    if arg1.starts_with('-') {
        argv.insert(1, "prices".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_prices() {
        assert_eq!(rewrite_args(argv(&["mandi"])), argv(&["mandi", "prices"]));
        assert_eq!(
            rewrite_args(argv(&["mandi", "-q", "wheat"])),
            argv(&["mandi", "prices", "-q", "wheat"])
        );
    }

    #[test]
    fn prices_export_flag_reaches_the_handler() {
        let cli = crate::cli::Cli::parse_from(argv(&[
            "mandi", "prices", "--demo", "--export", "prices.csv",
        ]));
        match cli.command {
            Command::Prices(args) => {
                assert!(args.screen.demo);
                assert_eq!(
                    args.export.as_deref(),
                    Some(std::path::Path::new("prices.csv"))
                );
            }
            other => panic!("expected prices subcommand, got {other:?}"),
        }
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["mandi", "rank", "-c", "Wheat"])),
            argv(&["mandi", "rank", "-c", "Wheat"])
        );
        assert_eq!(rewrite_args(argv(&["mandi", "--help"])), argv(&["mandi", "--help"]));
    }
}
