//! URL construction for OSRM-compatible `route` requests.

use crate::geo_point::GeoPoint;

/// A driving-route request between two points.
///
/// Always asks for the full overview geometry as GeoJSON with step details,
/// which is what [`crate::parser`] expects.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteRequest {
    pub profile: String,
    pub origin: GeoPoint,
    pub destination: GeoPoint,
}

impl RouteRequest {
    pub fn driving(origin: GeoPoint, destination: GeoPoint) -> Self {
        Self {
            profile: "driving".to_owned(),
            origin,
            destination,
        }
    }

    /// Full request URL below `base_url` (e.g. `https://router.project-osrm.org`).
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{}/route/v1/{}/{};{}?overview=full&geometries=geojson&steps=true",
            base_url.trim_end_matches('/'),
            self.profile,
            lon_lat(self.origin),
            lon_lat(self.destination),
        )
    }
}

fn lon_lat(point: GeoPoint) -> String {
    format!("{},{}", point.longitude(), point.latitude())
}
