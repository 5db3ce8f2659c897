//! Command-line parsing for the mandi price screener.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the data/signal code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "mandi", version, about = "Mandi price screener and market ranker (AGMARKNET-based)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch current prices and print them with derived signals.
    Prices(PricesArgs),
    /// Print advisory cohorts (gainers / decliners / stable).
    Advice(ScreenArgs),
    /// Rank markets for a commodity by net profit after transport.
    Rank(RankArgs),
}

/// Options for the price table.
#[derive(Debug, Args)]
pub struct PricesArgs {
    #[command(flatten)]
    pub screen: ScreenArgs,

    /// Export the enriched price table to a CSV file.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Common options for fetching and screening prices.
#[derive(Debug, Args, Clone)]
pub struct ScreenArgs {
    /// Case-insensitive commodity filter (substring match).
    #[arg(short = 'q', long)]
    pub query: Option<String>,

    /// Feed filter: state.
    #[arg(long)]
    pub state: Option<String>,

    /// Feed filter: district.
    #[arg(long)]
    pub district: Option<String>,

    /// Feed filter: market.
    #[arg(long)]
    pub market: Option<String>,

    /// Feed page size.
    #[arg(long, default_value_t = 100)]
    pub limit: usize,

    /// Skip the live feed and use the built-in demo dataset.
    #[arg(long)]
    pub demo: bool,

    /// Sell-now cut point (percent change); rising records past this read "sell now".
    #[arg(long = "sell-threshold", default_value_t = 5.0)]
    pub sell_threshold: f64,
}

/// Options for ranking markets.
#[derive(Debug, Args)]
pub struct RankArgs {
    #[command(flatten)]
    pub screen: ScreenArgs,

    /// Commodity to rank markets for.
    #[arg(short = 'c', long)]
    pub commodity: String,

    /// Quantity to sell (in the price unit, usually quintals).
    #[arg(short = 'n', long, default_value_t = 10.0)]
    pub quantity: f64,

    /// Transport cost per km (₹).
    #[arg(long = "cost-per-km", default_value_t = 15.0)]
    pub cost_per_km: f64,

    /// Origin city for distance resolution.
    #[arg(long = "from", default_value = "delhi")]
    pub origin: String,

    /// Origin latitude (takes precedence over --from when paired with --lon).
    #[arg(long)]
    pub lat: Option<f64>,

    /// Origin longitude.
    #[arg(long)]
    pub lon: Option<f64>,

    /// Opt in to AI-estimated distances for cities the offline tables miss.
    #[arg(long)]
    pub ai: bool,

    /// Export the ranking to a JSON file.
    #[arg(long)]
    pub export: Option<PathBuf>,
}
