//! Price data sources.
//!
//! - AGMARKNET open-data feed client + normalization (`agmarknet`)
//! - built-in demo dataset used as the degrade target (`demo`)
//! - static minimum-support-price reference table (`msp`)
//! - the repository tying them together with never-fail semantics (`repository`)

pub mod agmarknet;
pub mod demo;
pub mod msp;
pub mod repository;

pub use agmarknet::AgmarknetClient;
pub use repository::{search_prices, PriceRepository};
