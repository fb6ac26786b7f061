use anyhow::{bail, Context, Result};
use commonspot_navigation::GeoPoint;
use geojson::{GeoJson, Value};
use std::path::Path;

/// Read an ordered list of position fixes from a GeoJSON file
pub fn read_fixes(path: &Path) -> Result<Vec<GeoPoint>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixes file: {}", path.display()))?;

    let geojson: GeoJson = content
        .parse()
        .with_context(|| format!("Failed to parse GeoJSON from: {}", path.display()))?;

    let fixes = fixes_from_geojson(geojson)?;
    if fixes.is_empty() {
        bail!("No position fixes found in: {}", path.display());
    }
    Ok(fixes)
}

/// Collect fixes from a track. Accepts a LineString or MultiPoint geometry,
/// or a FeatureCollection whose features are visited in order.
pub fn fixes_from_geojson(geojson: GeoJson) -> Result<Vec<GeoPoint>> {
    match geojson {
        GeoJson::Geometry(geom) => value_to_fixes(geom.value),
        GeoJson::Feature(feature) => match feature.geometry {
            Some(geom) => value_to_fixes(geom.value),
            None => bail!("Feature has no geometry"),
        },
        GeoJson::FeatureCollection(fc) => {
            let mut fixes = Vec::new();
            for feature in fc.features {
                if let Some(geom) = feature.geometry {
                    fixes.extend(value_to_fixes(geom.value)?);
                }
            }
            Ok(fixes)
        }
    }
}

fn value_to_fixes(value: Value) -> Result<Vec<GeoPoint>> {
    match value {
        Value::Point(position) => Ok(vec![position_to_point(&position)?]),
        Value::MultiPoint(positions) | Value::LineString(positions) => {
            positions.iter().map(|p| position_to_point(p)).collect()
        }
        other => bail!("Unsupported geometry for fixes: {}", other.type_name()),
    }
}

fn position_to_point(position: &[f64]) -> Result<GeoPoint> {
    let &[longitude, latitude, ..] = position else {
        bail!("Position needs at least two values, got {}", position.len());
    };
    GeoPoint::from_lon_lat([longitude, latitude])
        .with_context(|| format!("Invalid position [{longitude}, {latitude}]"))
}
