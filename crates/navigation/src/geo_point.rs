//! WGS84 coordinate value with great-circle helpers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::types::CoordinateError;

/// Mean Earth radius in meters used for haversine distances.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// An immutable latitude/longitude pair in degrees.
///
/// Latitude is always within `[-90, 90]` and longitude within `[-180, 180]`
/// when built through [`GeoPoint::try_new`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Build a point without range checks. Intended for literals known to be valid.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a point, rejecting non-finite or out-of-range coordinates.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::Longitude(longitude));
        }

        Ok(Self::new(latitude, longitude))
    }

    /// Build a point from a GeoJSON-ordered `[longitude, latitude]` pair.
    pub fn from_lon_lat([longitude, latitude]: [f64; 2]) -> Result<Self, CoordinateError> {
        Self::try_new(latitude, longitude)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in meters (haversine).
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let lat_from = self.latitude.to_radians();
        let lat_to = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat_from.cos() * lat_to.cos() * (delta_lon / 2.0).sin().powi(2);

        // Rounding can push `a` slightly outside [0, 1] near antipodes.
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }

    /// Initial compass bearing towards `other`, in degrees within `[0, 360)`.
    pub fn bearing_to(&self, other: &GeoPoint) -> f64 {
        let lat_from = self.latitude.to_radians();
        let lat_to = other.latitude.to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let y = delta_lon.sin() * lat_to.cos();
        let x = lat_from.cos() * lat_to.sin() - lat_from.sin() * lat_to.cos() * delta_lon.cos();

        let bearing = y.atan2(x).to_degrees();

        // Not `rem_euclid`: it returns 360.0 for tiny negative inputs.
        (bearing + 360.0) % 360.0
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}°, {:.6}°)", self.latitude, self.longitude)
    }
}

impl From<GeoPoint> for geo::Point {
    fn from(point: GeoPoint) -> Self {
        geo::Point::new(point.longitude, point.latitude)
    }
}

impl From<GeoPoint> for geo::Coord {
    fn from(point: GeoPoint) -> Self {
        geo::Coord {
            x: point.longitude,
            y: point.latitude,
        }
    }
}

impl TryFrom<geo::Point> for GeoPoint {
    type Error = CoordinateError;

    fn try_from(point: geo::Point) -> Result<Self, Self::Error> {
        Self::try_new(point.y(), point.x())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_distance_to_self_is_zero() {
        let points = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(-33.9249, 18.4241),
            GeoPoint::new(90.0, 180.0),
            GeoPoint::new(-90.0, -180.0),
        ];

        for p in points {
            assert_eq!(p.distance_to(&p), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let cape_town = GeoPoint::new(-33.9249, 18.4241);
        let johannesburg = GeoPoint::new(-26.2041, 28.0473);

        assert_relative_eq!(
            cape_town.distance_to(&johannesburg),
            johannesburg.distance_to(&cape_town),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let a = GeoPoint::new(10.0, 20.0);
        let b = GeoPoint::new(11.0, 20.0);

        assert_relative_eq!(a.distance_to(&b), 111_195.0, max_relative = 0.01);
    }

    #[test]
    fn test_antipodal_distance_is_finite() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);

        let dist = a.distance_to(&b);
        assert!(dist.is_finite());
        assert_relative_eq!(dist, std::f64::consts::PI * EARTH_RADIUS_M, max_relative = 1e-9);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = GeoPoint::new(0.0, 0.0);

        assert_abs_diff_eq!(origin.bearing_to(&GeoPoint::new(1.0, 0.0)), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(origin.bearing_to(&GeoPoint::new(0.0, 1.0)), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(origin.bearing_to(&GeoPoint::new(-1.0, 0.0)), 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(origin.bearing_to(&GeoPoint::new(0.0, -1.0)), 270.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bearing_range() {
        let origin = GeoPoint::new(-33.8041137, 18.5189693);

        for lat_step in -8..=8 {
            for lon_step in -8..=8 {
                let target = GeoPoint::new(
                    origin.latitude() + lat_step as f64 * 0.37,
                    origin.longitude() + lon_step as f64 * 0.41,
                );
                let bearing = origin.bearing_to(&target);
                assert!(
                    (0.0..360.0).contains(&bearing),
                    "bearing {bearing} out of range for {target}"
                );
            }
        }

        // Identical points have no direction; atan2(0, 0) is 0.
        assert_eq!(origin.bearing_to(&origin), 0.0);
    }

    #[test]
    fn test_bearing_uses_full_compass() {
        // South-west must land in the third quadrant, not be folded into 0-90.
        let a = GeoPoint::new(-33.866669, 18.5);
        let b = GeoPoint::new(-33.9249, 18.4241);

        let bearing = a.bearing_to(&b);
        assert!(bearing > 180.0 && bearing < 270.0, "got {bearing}");
    }

    #[test]
    fn test_try_new_validates_ranges() {
        assert!(GeoPoint::try_new(45.0, 90.0).is_ok());
        assert!(GeoPoint::try_new(90.0, -180.0).is_ok());
        assert_eq!(
            GeoPoint::try_new(90.5, 0.0),
            Err(CoordinateError::Latitude(90.5))
        );
        assert_eq!(
            GeoPoint::try_new(0.0, -180.5),
            Err(CoordinateError::Longitude(-180.5))
        );
        assert!(GeoPoint::try_new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_lon_lat_order() {
        let p = GeoPoint::from_lon_lat([18.4241, -33.9249]).unwrap();
        assert_eq!(p.latitude(), -33.9249);
        assert_eq!(p.longitude(), 18.4241);

        let geo_point: geo::Point = p.into();
        assert_eq!(geo_point.x(), 18.4241);
        assert_eq!(geo_point.y(), -33.9249);
        assert_eq!(GeoPoint::try_from(geo_point), Ok(p));
    }

    #[test]
    fn test_display() {
        let p = GeoPoint::new(48.057440, -123.119625);
        assert_eq!(format!("{p}"), "(48.057440°, -123.119625°)");
    }
}
