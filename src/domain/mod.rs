//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - price observations and their history (`PriceRecord`, `PricePoint`)
//! - derived decision signals (`EnrichedPriceRecord`, `SellSignal`, `Advisory`)
//! - market ranking output (`ProfitEstimate`)
//! - run configuration (`ScreenConfig`, `PriceFilters`)

pub mod types;

pub use types::*;
