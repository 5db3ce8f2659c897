//! Export helpers.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream
//! scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{EnrichedPriceRecord, ProfitEstimate};
use crate::error::AppError;

/// Write the enriched price table to a CSV file.
pub fn write_prices_csv(path: &Path, records: &[EnrichedPriceRecord]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(
        file,
        "commodity,market,unit,price,change_pct,trend,signal,volatility,msp,msp_delta,vs_yesterday,vs_last_week,vs_last_month,last_updated"
    )
    .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for rec in records {
        let (msp, msp_delta) = match &rec.msp {
            Some(cmp) => (format!("{:.2}", cmp.msp), format!("{:.2}", cmp.delta)),
            None => (String::new(), String::new()),
        };
        writeln!(
            file,
            "{},{},{},{:.2},{:.4},{:?},{:?},{},{},{},{:.4},{:.4},{:.4},{}",
            rec.record.commodity,
            rec.record.market,
            rec.record.unit,
            rec.record.price,
            rec.record.change_pct,
            rec.record.trend,
            rec.sell_signal,
            rec.volatility.display_name(),
            msp,
            msp_delta,
            rec.comparisons.vs_yesterday,
            rec.comparisons.vs_last_week,
            rec.comparisons.vs_last_month,
            rec.record.last_updated,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write a market ranking to a JSON file.
pub fn write_rankings_json(path: &Path, estimates: &[ProfitEstimate]) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(estimates)
        .map_err(|e| AppError::new(4, format!("Failed to serialize rankings: {e}")))?;
    std::fs::write(path, json)
        .map_err(|e| AppError::new(2, format!("Failed to write rankings JSON '{}': {e}", path.display())))
}
