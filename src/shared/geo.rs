use crate::shared::constants::EARTH_RADIUS_METERS;

/// Parse a "lat,lng" coordinate string.
///
/// Reports are stored with the coordinate exactly as the client submitted
/// it, so malformed values do show up; callers decide whether to skip or
/// reject. Out-of-range coordinates are treated as malformed.
pub fn parse_lat_lng(raw: &str) -> Option<(f64, f64)> {
    let mut parts = raw.split(',');
    let lat = parts.next()?.trim().parse::<f64>().ok()?;
    let lng = parts.next()?.trim().parse::<f64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return None;
    }
    Some((lat, lng))
}

/// Haversine distance between two points in meters
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_METERS * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_coordinates() {
        assert_eq!(parse_lat_lng("29.9,-90.1"), Some((29.9, -90.1)));
        assert_eq!(parse_lat_lng(" 29.9 , -90.1 "), Some((29.9, -90.1)));
    }

    #[test]
    fn test_parse_malformed_coordinates() {
        assert_eq!(parse_lat_lng(""), None);
        assert_eq!(parse_lat_lng("flooded street"), None);
        assert_eq!(parse_lat_lng("29.9"), None);
        assert_eq!(parse_lat_lng("29.9,-90.1,5"), None);
        assert_eq!(parse_lat_lng("91.0,-90.1"), None);
        assert_eq!(parse_lat_lng("29.9,181.0"), None);
    }

    #[test]
    fn test_haversine_distance() {
        // New Orleans to Baton Rouge, approx 109km by Haversine
        let nola = (29.9511, -90.0715);
        let baton_rouge = (30.4515, -91.1871);

        let distance = haversine_distance(nola.0, nola.1, baton_rouge.0, baton_rouge.1);

        assert!(distance > 100_000.0 && distance < 125_000.0);
    }

    #[test]
    fn test_haversine_same_point() {
        let distance = haversine_distance(29.9511, -90.0715, 29.9511, -90.0715);

        assert!(distance < 1.0); // Less than 1 meter
    }
}
