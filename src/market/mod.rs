//! Decision-support signals derived from price records.
//!
//! - per-record enrichment: volatility, MSP comparison, sell signal,
//!   comparison deltas (`enrich`)
//! - whole-list advisory cohorts (`advice`)

pub mod advice;
pub mod enrich;

pub use advice::advise;
pub use enrich::{enrich, enrich_record};
