//! Result exports.
//!
//! - enriched prices to CSV (`export::write_prices_csv`)
//! - market rankings to JSON (`export::write_rankings_json`)

pub mod export;

pub use export::*;
