use haversine::{distance, Location, Units};

use crate::hungaromet::LatLon;

/// Great-circle distance between two coordinates in kilometers.
///
/// Uses the haversine formula on a sphere with the mean Earth radius
/// (6371 km). Inputs are degrees. NaN coordinates propagate NaN, so callers
/// that care must filter invalid coordinates beforehand.
pub fn distance_km(a: LatLon, b: LatLon) -> f64 {
    distance(
        Location {
            latitude: a.0,
            longitude: a.1,
        },
        Location {
            latitude: b.0,
            longitude: b.1,
        },
        Units::Kilometers,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_for_identical_points() {
        let p = LatLon(47.5, 19.0);
        assert!(distance_km(p, p).abs() < 0.1);
    }

    #[test]
    fn symmetric() {
        let budapest = LatLon(47.4979, 19.0402);
        let debrecen = LatLon(47.5316, 21.6273);
        let there = distance_km(budapest, debrecen);
        let back = distance_km(debrecen, budapest);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn budapest_to_debrecen_is_roughly_200_km() {
        let d = distance_km(LatLon(47.4979, 19.0402), LatLon(47.5316, 21.6273));
        assert!((d - 200.0).abs() < 10.0, "got {d} km");
    }

    #[test]
    fn nan_coordinates_propagate() {
        let d = distance_km(LatLon(f64::NAN, 19.0), LatLon(47.5, 19.0));
        assert!(d.is_nan());
    }
}
