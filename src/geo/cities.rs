//! Offline city-distance tables.
//!
//! Two static tables back the instant tier of distance resolution:
//!
//! - a symmetric pairwise road-distance table between major cities
//! - a small-town → nearest-major-city map for mandi towns the pairwise
//!   table does not cover
//!
//! All lookups normalize (trim + lowercase) and the pairwise table is checked
//! in both directions, so argument order never matters.

/// Approximate road distances (km) between major cities. Stored one direction;
/// `city_distance` checks both.
const CITY_PAIRS: &[(&str, &str, f64)] = &[
    ("delhi", "mumbai", 1400.0),
    ("delhi", "jaipur", 280.0),
    ("delhi", "chandigarh", 250.0),
    ("delhi", "amritsar", 450.0),
    ("delhi", "lucknow", 500.0),
    ("delhi", "kanpur", 440.0),
    ("delhi", "bhopal", 780.0),
    ("delhi", "indore", 810.0),
    ("delhi", "ahmedabad", 950.0),
    ("delhi", "patna", 1050.0),
    ("delhi", "nagpur", 1060.0),
    ("delhi", "nashik", 1270.0),
    ("delhi", "pune", 1410.0),
    ("delhi", "kolkata", 1500.0),
    ("delhi", "hyderabad", 1580.0),
    ("delhi", "bengaluru", 2150.0),
    ("delhi", "chennai", 2200.0),
    ("mumbai", "pune", 150.0),
    ("mumbai", "nashik", 170.0),
    ("mumbai", "ahmedabad", 530.0),
    ("mumbai", "indore", 590.0),
    ("mumbai", "hyderabad", 710.0),
    ("mumbai", "nagpur", 820.0),
    ("mumbai", "bengaluru", 980.0),
    ("pune", "nashik", 210.0),
    ("pune", "hyderabad", 560.0),
    ("ahmedabad", "jaipur", 660.0),
    ("ahmedabad", "indore", 400.0),
    ("indore", "bhopal", 190.0),
    ("indore", "nagpur", 540.0),
    ("bhopal", "nagpur", 350.0),
    ("nagpur", "hyderabad", 500.0),
    ("hyderabad", "bengaluru", 570.0),
    ("hyderabad", "chennai", 630.0),
    ("bengaluru", "chennai", 350.0),
    ("bengaluru", "mysuru", 150.0),
    ("lucknow", "kanpur", 90.0),
    ("lucknow", "patna", 540.0),
    ("kolkata", "patna", 580.0),
];

/// Mandi towns mapped to their nearest major city (both sides lowercase).
const NEARBY: &[(&str, &str)] = &[
    ("azadpur", "delhi"),
    ("sonipat", "delhi"),
    ("panipat", "delhi"),
    ("hapur", "delhi"),
    ("karnal", "delhi"),
    ("agra", "delhi"),
    ("vashi", "mumbai"),
    ("kalyan", "mumbai"),
    ("baramati", "pune"),
    ("lasalgaon", "nashik"),
    ("pimpalgaon", "nashik"),
    ("sendhwa", "indore"),
    ("khandwa", "indore"),
    ("ujjain", "indore"),
    ("dewas", "indore"),
    ("rajkot", "ahmedabad"),
    ("unjha", "ahmedabad"),
    ("hoskote", "bengaluru"),
    ("kolar", "bengaluru"),
    ("guntur", "hyderabad"),
    ("nizamabad", "hyderabad"),
    ("sikar", "jaipur"),
    ("kota", "jaipur"),
    ("barabanki", "lucknow"),
];

fn normalize(city: &str) -> String {
    city.trim().to_lowercase()
}

/// Direct pairwise lookup, symmetric and case/whitespace-insensitive.
///
/// The same city on both sides is distance zero. Returns `None` when either
/// city is absent from the table.
pub fn city_distance(a: &str, b: &str) -> Option<f64> {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return None;
    }
    if a == b {
        return Some(0.0);
    }
    CITY_PAIRS
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|&(_, _, km)| km)
}

/// Whether the city appears in the pairwise table.
pub fn is_major_city(city: &str) -> bool {
    let city = normalize(city);
    CITY_PAIRS.iter().any(|(a, b, _)| *a == city || *b == city)
}

/// Resolve a city to itself (if major) or to its mapped nearest major city.
pub fn nearest_major_city(city: &str) -> Option<String> {
    let city = normalize(city);
    if city.is_empty() {
        return None;
    }
    if is_major_city(&city) {
        return Some(city);
    }
    NEARBY
        .iter()
        .find(|(town, _)| *town == city)
        .map(|&(_, major)| major.to_string())
}
