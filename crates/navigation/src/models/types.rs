//! Core route types and errors.

use geo::LineString;
use serde::{Deserialize, Serialize};

use crate::geo_point::GeoPoint;
use crate::tracker::TrackerState;

// ============================================================================
// Data Structures
// ============================================================================

/// A single maneuver of a route (e.g. "Turn left onto Main St").
///
/// Built once while parsing a routing response and never modified afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationStep {
    pub distance_m: f64,
    pub duration_s: f64,
    pub instruction: String,
    pub maneuver_location: GeoPoint,
    pub maneuver_type: String,
    pub maneuver_modifier: Option<String>,
    pub road_name: String,
}

/// A complete driving route: path geometry plus the ordered maneuvers.
///
/// Legs of multi-waypoint routes are flattened into `steps`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    polyline: Vec<GeoPoint>,
    total_duration_s: u64,
    steps: Vec<NavigationStep>,
}

impl Route {
    pub fn new(polyline: Vec<GeoPoint>, total_duration_s: u64, steps: Vec<NavigationStep>) -> Self {
        Self {
            polyline,
            total_duration_s,
            steps,
        }
    }

    pub fn polyline(&self) -> &[GeoPoint] {
        &self.polyline
    }

    pub fn total_duration_s(&self) -> u64 {
        self.total_duration_s
    }

    pub fn steps(&self) -> &[NavigationStep] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&NavigationStep> {
        self.steps.get(index)
    }

    /// Sum of all step distances in meters.
    pub fn total_distance_m(&self) -> f64 {
        self.remaining_distance_m(0)
    }

    /// Distance covered by the steps from `index` (inclusive) to the end.
    pub fn remaining_distance_m(&self, index: usize) -> f64 {
        self.steps.iter().skip(index).map(|s| s.distance_m).sum()
    }

    /// Duration of the steps from `index` (inclusive) to the end.
    pub fn remaining_duration_s(&self, index: usize) -> f64 {
        self.steps.iter().skip(index).map(|s| s.duration_s).sum()
    }

    /// Length of the path geometry in meters, measured point to point.
    pub fn polyline_length_m(&self) -> f64 {
        self.polyline
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }

    /// Path geometry as a `geo` line string (x = longitude, y = latitude).
    pub fn geometry(&self) -> LineString {
        self.polyline.iter().copied().map(geo::Coord::from).collect()
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("Latitude out of range: {0}")]
    Latitude(f64),

    #[error("Longitude out of range: {0}")]
    Longitude(f64),
}

/// A routing response that could not be turned into a [`Route`].
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Routing service reported {code}: {message}")]
    Service { code: String, message: String },

    #[error("No route found")]
    NoRoute,

    #[error("Invalid route geometry at point {index}: {source}")]
    Geometry {
        index: usize,
        #[source]
        source: CoordinateError,
    },

    #[error("Route geometry has {0} points, need at least 2")]
    DegenerateGeometry(usize),

    #[error("Route contains no usable steps")]
    NoSteps,
}

/// Misuse of the navigation tracker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid session operation: cannot {operation} while {state:?}")]
    InvalidSessionOperation {
        operation: &'static str,
        state: TrackerState,
    },

    #[error("Invalid session operation: route has no steps")]
    EmptyRoute,
}

pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn step(distance_m: f64, duration_s: f64) -> NavigationStep {
        NavigationStep {
            distance_m,
            duration_s,
            instruction: "Continue".into(),
            maneuver_location: GeoPoint::new(0.0, 0.0),
            maneuver_type: "continue".into(),
            maneuver_modifier: None,
            road_name: String::new(),
        }
    }

    #[test]
    fn test_remaining_totals() {
        let route = Route::new(
            vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01)],
            90,
            vec![step(100.0, 10.0), step(250.5, 30.0), step(0.0, 0.0)],
        );

        assert_relative_eq!(route.total_distance_m(), 350.5);
        assert_relative_eq!(route.remaining_distance_m(1), 250.5);
        assert_relative_eq!(route.remaining_duration_s(1), 30.0);
        assert_eq!(route.remaining_distance_m(3), 0.0);
        assert_eq!(route.remaining_distance_m(10), 0.0);
    }

    #[test]
    fn test_geometry_uses_lon_lat() {
        let route = Route::new(
            vec![GeoPoint::new(-33.9, 18.4), GeoPoint::new(-33.8, 18.5)],
            0,
            vec![step(0.0, 0.0)],
        );

        let line = route.geometry();
        assert_eq!(line.0.len(), 2);
        assert_eq!(line.0[0].x, 18.4);
        assert_eq!(line.0[0].y, -33.9);
        assert_relative_eq!(
            route.polyline_length_m(),
            route.polyline()[0].distance_to(&route.polyline()[1])
        );
    }
}
