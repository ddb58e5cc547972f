use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::geojson::parse_polygon;
use crate::geom::{LocalProjection, PolygonMetrics, RingMetrics};

/// Site metrics for one polygon.
///
/// `compactness` and `aspect_ratio` serialize as `null` when they cannot be
/// computed, which is distinct from a computed zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub area_m2: f64,
    pub area_ping: f64,
    pub perimeter_m: f64,
    pub ratio: f64,
    pub compactness: Option<f64>,
    /// `[minLon, minLat, maxLon, maxLat]` of the exterior ring, in degrees.
    pub bbox: [f64; 4],
    pub bbox_area_m2: f64,
    pub aspect_ratio: Option<f64>,
}

impl AnalysisResult {
    fn new(metrics: &PolygonMetrics, config: &AnalysisConfig) -> Self {
        let (min, max) = (metrics.bounds.min(), metrics.bounds.max());
        Self {
            area_m2: metrics.area,
            area_ping: config.to_local_units(metrics.area),
            perimeter_m: metrics.perimeter,
            ratio: metrics.ratio(),
            compactness: metrics.polsby_popper(),
            bbox: [min.x, min.y, max.x, max.y],
            bbox_area_m2: metrics.bounds_area,
            aspect_ratio: metrics.aspect_ratio(),
        }
    }
}

/// Analyze a bare GeoJSON `Polygon` geometry with the default constants.
pub fn analyze(geometry: &Value) -> Result<AnalysisResult, AnalysisError> {
    analyze_with(geometry, &AnalysisConfig::default())
}

/// Analyze a bare GeoJSON `Polygon` geometry.
///
/// Validation, projection, per-ring measurement and aggregation run in
/// sequence; the first failure is returned and no partial result is built.
pub fn analyze_with(geometry: &Value, config: &AnalysisConfig) -> Result<AnalysisResult, AnalysisError> {
    let polygon = parse_polygon(geometry)?;
    let projection = LocalProjection::centered_on(&polygon, config)
        .ok_or_else(|| AnalysisError::invalid("exterior ring has no positions"))?;
    let projected = projection.project_polygon(&polygon);

    tracing::debug!(
        rings = 1 + polygon.interiors().len(),
        vertices = polygon.exterior().0.len(),
        origin_lon = projection.origin().x,
        origin_lat = projection.origin().y,
        "analyzing polygon"
    );

    let exterior = RingMetrics::compute(0, polygon.exterior(), projected.exterior())?;
    let holes = polygon.interiors().iter()
        .zip(projected.interiors())
        .enumerate()
        .map(|(i, (source, projected))| RingMetrics::compute(i + 1, source, projected))
        .collect::<Result<Vec<_>, _>>()?;

    let metrics = PolygonMetrics::aggregate(&exterior, &holes, &projection);
    Ok(AnalysisResult::new(&metrics, config))
}

/// Parse JSON text and analyze it. Malformed text is `InvalidGeometry`.
pub fn analyze_str(text: &str, config: &AnalysisConfig) -> Result<AnalysisResult, AnalysisError> {
    let geometry: Value = serde_json::from_str(text)
        .map_err(|e| AnalysisError::invalid(format!("malformed JSON: {e}")))?;
    analyze_with(&geometry, config)
}

/// Analyze many geometries in parallel, one result per input, in input order.
pub fn analyze_batch(geometries: &[Value], config: &AnalysisConfig) -> Vec<Result<AnalysisResult, AnalysisError>> {
    geometries.par_iter()
        .map(|geometry| analyze_with(geometry, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::METERS_PER_DEGREE_LAT;
    use crate::error::ErrorKind;

    #[test]
    fn serializes_absent_compactness_as_null() {
        let result = AnalysisResult {
            area_m2: 0.0,
            area_ping: 0.0,
            perimeter_m: 0.0,
            ratio: 0.0,
            compactness: None,
            bbox: [0.0, 0.0, 0.0, 0.0],
            bbox_area_m2: 0.0,
            aspect_ratio: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["compactness"].is_null());
        assert!(json.as_object().unwrap().contains_key("compactness"));
        assert_eq!(json["bbox"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn area_ping_uses_configured_unit() {
        let geometry = json!({
            "type": "Polygon",
            "coordinates": [[[0, 0], [0.001, 0], [0.001, 0.001], [0, 0.001], [0, 0]]]
        });
        let config = AnalysisConfig::new(METERS_PER_DEGREE_LAT, 1.0).unwrap();
        let result = analyze_with(&geometry, &config).unwrap();
        assert_eq!(result.area_ping, result.area_m2);

        let result = analyze(&geometry).unwrap();
        assert!((result.area_ping * 3.305785 - result.area_m2).abs() < 1e-6);
    }

    #[test]
    fn malformed_text_is_invalid_geometry() {
        let err = analyze_str("{\"type\": \"Polygon\",", &AnalysisConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidGeometry);
    }

    #[test]
    fn degenerate_hole_is_reported_with_its_index() {
        let geometry = json!({
            "type": "Polygon",
            "coordinates": [
                [[0, 0], [0.001, 0], [0.001, 0.001], [0, 0.001], [0, 0]],
                [[0.0005, 0.0005], [0.0006, 0.0005], [0.0005, 0.0005]],
            ]
        });
        let err = analyze(&geometry).unwrap_err();
        assert_eq!(err, AnalysisError::DegenerateRing { ring: 1, distinct: 2 });
    }

    #[test]
    fn batch_keeps_input_order() {
        let good = json!({"type": "Polygon", "coordinates": [[[0, 0], [0.001, 0], [0.001, 0.001], [0, 0]]]});
        let bad = json!({"type": "LineString", "coordinates": [[0, 0], [1, 1]]});
        let results = analyze_batch(&[good.clone(), bad, good], &AnalysisConfig::default());

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert_eq!(results[1].as_ref().unwrap_err().kind(), ErrorKind::UnsupportedGeometryType);
        assert_eq!(results[0], results[2]);
    }
}
