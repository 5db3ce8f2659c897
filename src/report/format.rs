//! Formatted terminal output for prices, advisories, and rankings.

use crate::domain::{Advisory, EnrichedPriceRecord, MspStatus, ProfitEstimate, ScreenConfig};

/// Format the enriched price table.
pub fn format_price_table(records: &[EnrichedPriceRecord], config: &ScreenConfig) -> String {
    let mut out = String::new();

    out.push_str("=== mandi - commodity prices ===\n");
    out.push_str(&format!(
        "Records: {} | sell-now cut: >{:.1}%\n\n",
        records.len(),
        config.sell_now_pct
    ));

    out.push_str(&format!(
        "{:<12} {:<26} {:>10} {:>9} {:<2} {:<10} {:<7} {:>9} {:>9}\n",
        "commodity", "market", "price", "change%", "", "signal", "vol", "vs msp", "vs week%"
    ));
    out.push_str(&format!(
        "{:-<12} {:-<26} {:-<10} {:-<9} {:-<2} {:-<10} {:-<7} {:-<9} {:-<9}\n",
        "", "", "", "", "", "", "", "", ""
    ));

    for rec in records {
        let msp = match &rec.msp {
            Some(cmp) => {
                let sign = match cmp.status {
                    MspStatus::Above => "+",
                    MspStatus::Below => "-",
                };
                format!("{sign}{:.0}", cmp.delta.abs())
            }
            None => "-".to_string(),
        };
        out.push_str(&format!(
            "{:<12} {:<26} {:>10.2} {:>9.2} {:<2} {:<10} {:<7} {:>9} {:>9.2}\n",
            truncate(&rec.record.commodity, 12),
            truncate(&rec.record.market, 26),
            rec.record.price,
            rec.record.change_pct,
            rec.record.trend.arrow(),
            rec.sell_signal.display_name(),
            rec.volatility.display_name(),
            msp,
            rec.comparisons.vs_last_week,
        ));
    }

    out
}

/// Format the advisory cohorts.
pub fn format_advice(advisories: &[Advisory]) -> String {
    let mut out = String::new();

    out.push_str("=== mandi - market advice ===\n");
    if advisories.is_empty() {
        out.push_str("No cohort stands out today.\n");
        return out;
    }

    for advisory in advisories {
        out.push_str(&format!(
            "\n[{}] {}\n",
            advisory.kind.display_name(),
            advisory.kind.headline()
        ));
        out.push_str(&format!("  {}\n", advisory.commodities.join(", ")));
    }

    out
}

/// Format the market ranking for one commodity.
pub fn format_rankings(estimates: &[ProfitEstimate], commodity: &str, config: &ScreenConfig) -> String {
    let mut out = String::new();

    out.push_str("=== mandi - market ranking ===\n");
    out.push_str(&format!(
        "Commodity: {commodity} | from: {} | qty: {:.1} | transport: ₹{:.1}/km\n\n",
        config.origin, config.quantity, config.cost_per_km
    ));

    if estimates.is_empty() {
        out.push_str("No markets found for this commodity.\n");
        return out;
    }

    out.push_str(&format!(
        "{:<4} {:<26} {:>9} {:>11} {:>13}\n",
        "", "market", "km", "price", "net profit"
    ));
    out.push_str(&format!(
        "{:-<4} {:-<26} {:-<9} {:-<11} {:-<13}\n",
        "", "", "", "", ""
    ));

    for est in estimates {
        let marker = if est.best_choice { "best" } else { "" };
        out.push_str(&format!(
            "{:<4} {:<26} {:>9.0} {:>11.2} {:>13.2}\n",
            marker,
            truncate(&est.market, 26),
            est.distance_km,
            est.price_per_unit,
            est.net_profit,
        ));
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::demo::demo_records;
    use crate::market::{advise, enrich};

    #[test]
    fn price_table_mentions_every_commodity() {
        let config = ScreenConfig::default();
        let enriched = enrich(&demo_records(), config.sell_now_pct);
        let table = format_price_table(&enriched, &config);
        for rec in &enriched {
            assert!(table.contains(&rec.record.commodity), "{}", rec.record.commodity);
        }
    }

    #[test]
    fn advice_handles_empty_list() {
        let out = format_advice(&[]);
        assert!(out.contains("No cohort"));
    }

    #[test]
    fn advice_lists_cohort_members() {
        let config = ScreenConfig::default();
        let enriched = enrich(&demo_records(), config.sell_now_pct);
        let out = format_advice(&advise(&enriched));
        // Demo onion falls ~4% day-over-day: decliner? At least the header prints.
        assert!(out.contains("mandi - market advice"));
    }

    #[test]
    fn rankings_flag_the_best_row() {
        let config = ScreenConfig::default();
        let estimates = vec![
            ProfitEstimate {
                market: "Chandigarh Mandi".to_string(),
                distance_km: 250.0,
                price_per_unit: 2050.0,
                quantity: 10.0,
                cost_per_km: 15.0,
                net_profit: 16750.0,
                best_choice: true,
            },
            ProfitEstimate {
                market: "Jaipur Mandi".to_string(),
                distance_km: 280.0,
                price_per_unit: 2000.0,
                quantity: 10.0,
                cost_per_km: 15.0,
                net_profit: 15800.0,
                best_choice: false,
            },
        ];
        let out = format_rankings(&estimates, "Wheat", &config);
        assert!(out.contains("best"));
        assert!(out.contains("Chandigarh Mandi"));
        let best_line = out.lines().find(|l| l.starts_with("best")).unwrap();
        assert!(best_line.contains("Chandigarh"));
    }

    #[test]
    fn rankings_empty_message() {
        let out = format_rankings(&[], "Wheat", &ScreenConfig::default());
        assert!(out.contains("No markets found"));
    }
}
