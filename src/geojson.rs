use geo::{Coord, LineString, Polygon};
use serde_json::Value;

use crate::error::AnalysisError;

/// Validate a bare GeoJSON `Polygon` geometry and convert it into a `geo::Polygon`.
///
/// Checks run in a fixed order and the first failure wins:
/// 1. `type` is `"Polygon"`
/// 2. `coordinates` is a non-empty array of rings
/// 3. the exterior ring has at least 4 positions
/// 4. every ring is closed (no implicit closing)
/// 5. every position is exactly two finite numbers within lon/lat range
///
/// Consecutive duplicate positions are collapsed in the returned rings.
pub fn parse_polygon(value: &Value) -> Result<Polygon<f64>, AnalysisError> {
    let object = value.as_object()
        .ok_or_else(|| AnalysisError::invalid("geometry must be a JSON object"))?;

    match object.get("type").and_then(Value::as_str) {
        Some("Polygon") => {}
        Some(other) => return Err(AnalysisError::UnsupportedGeometryType(other.to_string())),
        None => return Err(AnalysisError::invalid("geometry is missing a string `type` member")),
    }

    let rings = object.get("coordinates")
        .and_then(Value::as_array)
        .ok_or_else(|| AnalysisError::invalid("`coordinates` must be an array of rings"))?;
    if rings.is_empty() {
        return Err(AnalysisError::invalid("`coordinates` must contain at least one ring"))
    }

    let rings = rings.iter().enumerate()
        .map(|(i, ring)| ring.as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| AnalysisError::invalid(format!("ring {i} must be an array of positions"))))
        .collect::<Result<Vec<_>, _>>()?;

    if rings[0].len() < 4 {
        return Err(AnalysisError::invalid(format!(
            "exterior ring has {} positions, at least 4 required", rings[0].len()
        )))
    }

    for (i, ring) in rings.iter().enumerate() {
        let (Some(first), Some(last)) = (ring.first(), ring.last()) else {
            return Err(AnalysisError::invalid(format!("ring {i} is empty")))
        };
        if !same_position(first, last) {
            return Err(AnalysisError::UnclosedRing { ring: i })
        }
    }

    let mut rings = rings.iter().enumerate()
        .map(|(i, ring)| parse_ring(i, ring))
        .collect::<Result<Vec<_>, _>>()?;
    let exterior = rings.remove(0);

    Ok(Polygon::new(exterior, rings))
}

/// Compare ring endpoints numerically, so `[0, 0]` and `[0.0, 0.0]` match.
/// Non-numeric endpoints are left for the position check to report.
fn same_position(a: &Value, b: &Value) -> bool {
    fn numeric(value: &Value) -> Option<Vec<f64>> {
        value.as_array()?.iter().map(Value::as_f64).collect()
    }

    match (numeric(a), numeric(b)) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

/// Parse one ring of positions, collapsing consecutive duplicates.
fn parse_ring(ring: usize, positions: &[Value]) -> Result<LineString<f64>, AnalysisError> {
    let mut coords = positions.iter().enumerate()
        .map(|(i, position)| parse_position(ring, i, position))
        .collect::<Result<Vec<_>, _>>()?;
    coords.dedup();
    Ok(LineString(coords))
}

/// Parse a single `[lon, lat]` position.
fn parse_position(ring: usize, index: usize, value: &Value) -> Result<Coord<f64>, AnalysisError> {
    let pair = value.as_array()
        .ok_or_else(|| AnalysisError::invalid(format!("ring {ring} position {index} is not an array")))?;
    if pair.len() != 2 {
        return Err(AnalysisError::invalid(format!(
            "ring {ring} position {index} has {} components, expected 2", pair.len()
        )))
    }

    let (Some(lon), Some(lat)) = (pair[0].as_f64(), pair[1].as_f64()) else {
        return Err(AnalysisError::invalid(format!("ring {ring} position {index} must contain numbers")))
    };
    if !lon.is_finite() || !lat.is_finite() {
        return Err(AnalysisError::invalid(format!("ring {ring} position {index} is not finite")))
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(AnalysisError::invalid(format!("ring {ring} position {index}: longitude {lon} out of range")))
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(AnalysisError::invalid(format!("ring {ring} position {index}: latitude {lat} out of range")))
    }

    Ok(Coord { x: lon, y: lat })
}
