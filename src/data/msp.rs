//! Minimum support price reference table.
//!
//! Central-government floor prices (₹/quintal, 2024-25 season). Static,
//! read-only at runtime; lookups are case-insensitive on the commodity name.

const MSP_TABLE: &[(&str, f64)] = &[
    ("wheat", 2275.0),
    ("paddy", 2183.0),
    // The feed labels paddy arrivals as "Rice" in several states.
    ("rice", 2183.0),
    ("maize", 2090.0),
    ("jowar", 3180.0),
    ("bajra", 2500.0),
    ("barley", 1735.0),
    ("gram", 5440.0),
    ("tur", 7000.0),
    ("moong", 8558.0),
    ("masur", 6425.0),
    ("groundnut", 6377.0),
    ("soybean", 4600.0),
    ("mustard", 5650.0),
    ("cotton", 6620.0),
];

/// Look up the MSP for a commodity, case-insensitively.
pub fn msp_for(commodity: &str) -> Option<f64> {
    let needle = commodity.trim().to_lowercase();
    MSP_TABLE
        .iter()
        .find(|(name, _)| *name == needle)
        .map(|&(_, msp)| msp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(msp_for("Wheat"), Some(2275.0));
        assert_eq!(msp_for(" WHEAT "), Some(2275.0));
        assert_eq!(msp_for("wheat"), Some(2275.0));
    }

    #[test]
    fn unknown_commodity_has_no_msp() {
        assert_eq!(msp_for("Tomato"), None);
        assert_eq!(msp_for(""), None);
    }
}
