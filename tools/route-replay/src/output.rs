use anyhow::{Context, Result};
use commonspot_navigation::{GeoPoint, Route};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use std::path::Path;

use crate::replay::ReplayEvent;

fn position(point: &GeoPoint) -> Vec<f64> {
    vec![point.longitude(), point.latitude()]
}

fn feature(value: Value, properties: serde_json::Map<String, serde_json::Value>) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Route line, one point per maneuver, and one point per replayed event
pub fn route_feature_collection(
    route: &Route,
    fixes: &[GeoPoint],
    events: &[ReplayEvent],
) -> FeatureCollection {
    let mut features = Vec::with_capacity(1 + route.steps().len() + events.len());

    let mut properties = serde_json::Map::new();
    properties.insert("feature_type".to_string(), serde_json::json!("route"));
    properties.insert(
        "duration_s".to_string(),
        serde_json::json!(route.total_duration_s()),
    );
    properties.insert(
        "length_m".to_string(),
        serde_json::json!(route.polyline_length_m()),
    );
    features.push(feature(
        Value::LineString(route.polyline().iter().map(position).collect()),
        properties,
    ));

    for (index, step) in route.steps().iter().enumerate() {
        let mut properties = serde_json::Map::new();
        properties.insert("feature_type".to_string(), serde_json::json!("maneuver"));
        properties.insert("index".to_string(), serde_json::json!(index));
        properties.insert(
            "instruction".to_string(),
            serde_json::json!(step.instruction),
        );
        features.push(feature(
            Value::Point(position(&step.maneuver_location)),
            properties,
        ));
    }

    for replayed in events {
        let Some(fix) = fixes.get(replayed.fix_index) else {
            continue;
        };
        let mut properties = serde_json::Map::new();
        properties.insert("feature_type".to_string(), serde_json::json!("event"));
        properties.insert("fix_index".to_string(), serde_json::json!(replayed.fix_index));
        properties.insert(
            "event".to_string(),
            serde_json::json!(format!("{:?}", replayed.event)),
        );
        features.push(feature(Value::Point(position(fix)), properties));
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

pub fn write_route_geojson(
    route: &Route,
    fixes: &[GeoPoint],
    events: &[ReplayEvent],
    output_path: &Path,
) -> Result<()> {
    let geojson = GeoJson::from(route_feature_collection(route, fixes, events));
    let json_string =
        serde_json::to_string_pretty(&geojson).context("Failed to serialize GeoJSON")?;

    std::fs::write(output_path, json_string)
        .with_context(|| format!("Failed to write GeoJSON to {}", output_path.display()))?;

    Ok(())
}
