//! Great-circle distance and the major-city coordinate table.

use crate::domain::Coord;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Coordinates for the major cities in the pairwise table.
const CITY_COORDS: &[(&str, f64, f64)] = &[
    ("delhi", 28.6139, 77.2090),
    ("mumbai", 19.0760, 72.8777),
    ("pune", 18.5204, 73.8567),
    ("nashik", 19.9975, 73.7898),
    ("ahmedabad", 23.0225, 72.5714),
    ("jaipur", 26.9124, 75.7873),
    ("chandigarh", 30.7333, 76.7794),
    ("amritsar", 31.6340, 74.8723),
    ("lucknow", 26.8467, 80.9462),
    ("kanpur", 26.4499, 80.3319),
    ("bhopal", 23.2599, 77.4126),
    ("indore", 22.7196, 75.8577),
    ("nagpur", 21.1458, 79.0882),
    ("patna", 25.5941, 85.1376),
    ("kolkata", 22.5726, 88.3639),
    ("hyderabad", 17.3850, 78.4867),
    ("bengaluru", 12.9716, 77.5946),
    ("mysuru", 12.2958, 76.6394),
    ("chennai", 13.0827, 80.2707),
];

/// Coordinate for a major city, if we have one.
pub fn coords_for(city: &str) -> Option<Coord> {
    let city = city.trim().to_lowercase();
    CITY_COORDS
        .iter()
        .find(|(name, _, _)| *name == city)
        .map(|&(_, lat, lon)| Coord { lat, lon })
}

/// Haversine great-circle distance in km, rounded to the nearest km.
pub fn haversine_km(a: Coord, b: Coord) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    (EARTH_RADIUS_KM * c).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_is_symmetric() {
        let delhi = coords_for("delhi").unwrap();
        let mumbai = coords_for("mumbai").unwrap();
        assert_eq!(haversine_km(delhi, mumbai), haversine_km(mumbai, delhi));
    }

    #[test]
    fn haversine_zero_for_same_point() {
        let delhi = coords_for("delhi").unwrap();
        assert_eq!(haversine_km(delhi, delhi), 0.0);
    }

    #[test]
    fn delhi_mumbai_great_circle_is_plausible() {
        // Straight-line Delhi-Mumbai is ~1150 km (the road table says 1400).
        let km = haversine_km(coords_for("delhi").unwrap(), coords_for("mumbai").unwrap());
        assert!((1100.0..=1200.0).contains(&km), "got {km}");
    }

    #[test]
    fn coords_lookup_normalizes() {
        assert!(coords_for(" DELHI ").is_some());
        assert!(coords_for("atlantis").is_none());
    }
}
