//! Decoding of OSRM-compatible `route` responses into a [`Route`].
//!
//! Only the first route of a response is used. Legs are flattened into a
//! single ordered step list. Steps whose maneuver location is missing or
//! malformed are dropped and reported as [`StepSkipped`]; every other
//! structural problem fails the whole parse.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::geo_point::GeoPoint;
use crate::instruction::format_instruction;
use crate::models::types::{NavigationStep, ParseError, Route};

// ============================================================================
// Wire format
// ============================================================================

#[derive(Deserialize)]
struct OsrmResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
    duration: f64,
    legs: Vec<OsrmLeg>,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Deserialize)]
struct OsrmLeg {
    steps: Vec<OsrmStep>,
}

#[derive(Deserialize)]
struct OsrmStep {
    distance: f64,
    duration: f64,
    maneuver: OsrmManeuver,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Deserialize)]
struct OsrmManeuver {
    // Kept loose so a bad location only drops its own step.
    #[serde(default)]
    location: Option<Value>,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    modifier: Option<String>,
}

// ============================================================================
// Parse results
// ============================================================================

/// A step that was left out of the route because its maneuver location
/// could not be read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepSkipped {
    pub leg_index: usize,
    pub step_index: usize,
    pub reason: String,
}

/// A parsed route together with the steps that were dropped on the way.
#[derive(Clone, Debug)]
pub struct ParseOutcome {
    pub route: Route,
    pub skipped: Vec<StepSkipped>,
}

/// Parse a raw response body.
pub fn parse_route(raw: &[u8]) -> Result<Route, ParseError> {
    parse_route_detailed(raw).map(|outcome| outcome.route)
}

/// Parse a response that was already decoded into a JSON value.
pub fn parse_route_value(value: Value) -> Result<Route, ParseError> {
    let response: OsrmResponse = serde_json::from_value(value)?;
    build_route(response).map(|outcome| outcome.route)
}

/// Like [`parse_route`], but also reports skipped steps.
pub fn parse_route_detailed(raw: &[u8]) -> Result<ParseOutcome, ParseError> {
    let response: OsrmResponse = serde_json::from_slice(raw)?;
    build_route(response)
}

fn build_route(response: OsrmResponse) -> Result<ParseOutcome, ParseError> {
    if let Some(code) = response.code {
        if code != "Ok" {
            return Err(ParseError::Service {
                message: response.message.unwrap_or_default(),
                code,
            });
        }
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(ParseError::NoRoute)?;

    let polyline = route
        .geometry
        .coordinates
        .iter()
        .enumerate()
        .map(|(index, &pair)| {
            GeoPoint::from_lon_lat(pair).map_err(|source| ParseError::Geometry { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if polyline.len() < 2 {
        return Err(ParseError::DegenerateGeometry(polyline.len()));
    }

    // Saturating cast: negative or NaN durations become 0.
    let total_duration_s = route.duration.trunc() as u64;

    let mut steps = Vec::new();
    let mut skipped = Vec::new();

    for (leg_index, leg) in route.legs.into_iter().enumerate() {
        for (step_index, step) in leg.steps.into_iter().enumerate() {
            let location = match maneuver_location(step.maneuver.location.as_ref()) {
                Ok(location) => location,
                Err(reason) => {
                    warn!(leg = leg_index, step = step_index, %reason, "skipping step");
                    skipped.push(StepSkipped {
                        leg_index,
                        step_index,
                        reason,
                    });
                    continue;
                }
            };

            let modifier = step.maneuver.modifier.filter(|m| !m.is_empty());
            let road_name = step.name.unwrap_or_default();
            let instruction = format_instruction(
                &step.maneuver.kind,
                modifier.as_deref().unwrap_or(""),
                &road_name,
            );

            steps.push(NavigationStep {
                distance_m: step.distance,
                duration_s: step.duration,
                instruction,
                maneuver_location: location,
                maneuver_type: step.maneuver.kind,
                maneuver_modifier: modifier,
                road_name,
            });
        }
    }

    if steps.is_empty() {
        return Err(ParseError::NoSteps);
    }

    debug!(
        points = polyline.len(),
        steps = steps.len(),
        skipped = skipped.len(),
        duration_s = total_duration_s,
        "parsed route"
    );

    Ok(ParseOutcome {
        route: Route::new(polyline, total_duration_s, steps),
        skipped,
    })
}

/// Read a `[longitude, latitude]` pair.
fn maneuver_location(location: Option<&Value>) -> Result<GeoPoint, String> {
    let pair = match location {
        None | Some(Value::Null) => return Err("maneuver location is missing".to_owned()),
        Some(Value::Array(pair)) => pair,
        Some(other) => return Err(format!("maneuver location is not an array: {other}")),
    };

    match pair.as_slice() {
        [lon, lat] => match (lon.as_f64(), lat.as_f64()) {
            (Some(lon), Some(lat)) => GeoPoint::from_lon_lat([lon, lat]).map_err(|e| e.to_string()),
            _ => Err(format!("maneuver location is not numeric: {location:?}")),
        },
        _ => Err(format!(
            "maneuver location has {} entries, expected 2",
            pair.len()
        )),
    }
}
