//! Geographic primitives: WGS84 points, bounding boxes, and great-circle
//! distance.
//!
//! Everything downstream (synthesis, influence rings, engine bounds) works
//! in plain lng/lat degrees plus kilometre distances, so this module is the
//! only place that knows any spherical trigonometry.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres, used by the haversine distance.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres per degree of latitude (WGS84 mean).
pub const KM_PER_DEG_LAT: f64 = 110.574;

/// Kilometres per degree of longitude at the equator; scale by cos(lat).
pub const KM_PER_DEG_LNG_EQUATOR: f64 = 111.32;

// ---------------------------------------------------------------------------
// GeoPoint
// ---------------------------------------------------------------------------

/// A WGS84 coordinate. `lng` in [-180, 180], `lat` in [-90, 90].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lng: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Whether the coordinate is inside the valid WGS84 range.
    pub fn is_valid(&self) -> bool {
        (-180.0..=180.0).contains(&self.lng) && (-90.0..=90.0).contains(&self.lat)
    }
}

/// Great-circle distance between two points in kilometres (haversine).
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * h.sqrt().atan2((1.0 - h).sqrt()) * EARTH_RADIUS_KM
}

// ---------------------------------------------------------------------------
// GeoBounds
// ---------------------------------------------------------------------------

/// An axis-aligned lng/lat box, south-west and north-east corners inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub sw: GeoPoint,
    pub ne: GeoPoint,
}

impl GeoBounds {
    pub const fn new(sw: GeoPoint, ne: GeoPoint) -> Self {
        Self { sw, ne }
    }

    /// Both corners valid and the box has positive extent on both axes.
    pub fn is_valid(&self) -> bool {
        self.sw.is_valid() && self.ne.is_valid() && self.ne.lng > self.sw.lng && self.ne.lat > self.sw.lat
    }

    pub fn contains(&self, p: GeoPoint) -> bool {
        (self.sw.lng..=self.ne.lng).contains(&p.lng) && (self.sw.lat..=self.ne.lat).contains(&p.lat)
    }

    /// Latitude of the box centre, used to scale longitude steps.
    pub fn mid_lat(&self) -> f64 {
        (self.sw.lat + self.ne.lat) / 2.0
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_zero_for_identical_points() {
        let p = GeoPoint::new(120.2109, 30.2442);
        assert!(haversine_km(p, p).abs() < 1e-9);
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = GeoPoint::new(120.2109, 30.2442);
        let b = GeoPoint::new(120.1468, 30.2476);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn haversine_cbd_to_west_lake_is_about_six_km() {
        // Qianjiang CBD to West Lake, roughly 6.2 km apart.
        let cbd = GeoPoint::new(120.2109, 30.2442);
        let lake = GeoPoint::new(120.1468, 30.2476);
        let d = haversine_km(cbd, lake);
        assert!((5.8..6.6).contains(&d), "unexpected distance: {d}");
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = GeoPoint::new(120.0, 30.0);
        let b = GeoPoint::new(120.0, 31.0);
        let d = haversine_km(a, b);
        assert!((110.0..112.5).contains(&d), "unexpected distance: {d}");
    }

    #[test]
    fn point_validity_range_checks() {
        assert!(GeoPoint::new(120.0, 30.0).is_valid());
        assert!(GeoPoint::new(-180.0, -90.0).is_valid());
        assert!(!GeoPoint::new(181.0, 30.0).is_valid());
        assert!(!GeoPoint::new(120.0, 90.5).is_valid());
    }

    #[test]
    fn bounds_contains_and_validity() {
        let b = GeoBounds::new(GeoPoint::new(120.00, 30.12), GeoPoint::new(120.35, 30.38));
        assert!(b.is_valid());
        assert!(b.contains(GeoPoint::new(120.19, 30.25)));
        assert!(!b.contains(GeoPoint::new(119.50, 30.25)));

        let degenerate = GeoBounds::new(GeoPoint::new(120.35, 30.38), GeoPoint::new(120.00, 30.12));
        assert!(!degenerate.is_valid());
    }

    #[test]
    fn mid_lat_is_box_centre() {
        let b = GeoBounds::new(GeoPoint::new(120.0, 30.0), GeoPoint::new(121.0, 31.0));
        assert!((b.mid_lat() - 30.5).abs() < 1e-12);
    }
}
