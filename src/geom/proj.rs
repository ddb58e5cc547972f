use geo::{BoundingRect, Coord, MapCoords, Polygon, Rect};

use crate::config::AnalysisConfig;

/// Locally-flat equirectangular projection centered on a polygon.
///
/// Maps lon/lat degrees to meter offsets from `origin`:
/// `x = (lon - lon0) * m_lat * cos(lat0)`, `y = (lat - lat0) * m_lat`.
/// Accurate for parcel-scale extents (a few km); distortion grows with
/// distance from the origin and the scale collapses near the poles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalProjection {
    origin: Coord<f64>,
    meters_per_degree_lon: f64,
    meters_per_degree_lat: f64,
}

impl LocalProjection {
    /// Build a projection around an explicit origin (degrees).
    pub fn new(origin: Coord<f64>, config: &AnalysisConfig) -> Self {
        Self {
            origin,
            meters_per_degree_lon: config.meters_per_degree_lat() * origin.y.to_radians().cos(),
            meters_per_degree_lat: config.meters_per_degree_lat(),
        }
    }

    /// Build a projection around the center of the exterior ring's bounding box.
    /// Returns `None` if the exterior ring is empty.
    pub fn centered_on(polygon: &Polygon<f64>, config: &AnalysisConfig) -> Option<Self> {
        let bounds = polygon.exterior().bounding_rect()?;
        Some(Self::new(bounds.center(), config))
    }

    /// Get the projection origin in degrees.
    #[inline] pub fn origin(&self) -> Coord<f64> { self.origin }

    /// Get the longitude scale at the origin latitude, in meters per degree.
    #[inline] pub fn meters_per_degree_lon(&self) -> f64 { self.meters_per_degree_lon }

    /// Project a lon/lat coordinate to meters.
    #[inline]
    pub fn project(&self, coord: Coord<f64>) -> Coord<f64> {
        Coord {
            x: (coord.x - self.origin.x) * self.meters_per_degree_lon,
            y: (coord.y - self.origin.y) * self.meters_per_degree_lat,
        }
    }

    /// Map a meter offset back to lon/lat degrees.
    #[inline]
    pub fn unproject(&self, coord: Coord<f64>) -> Coord<f64> {
        Coord {
            x: self.origin.x + coord.x / self.meters_per_degree_lon,
            y: self.origin.y + coord.y / self.meters_per_degree_lat,
        }
    }

    /// Project every ring of a polygon, preserving ring structure.
    pub fn project_polygon(&self, polygon: &Polygon<f64>) -> Polygon<f64> {
        polygon.map_coords(|coord: Coord<f64>| self.project(coord))
    }

    /// Project the corners of a lon/lat rectangle.
    pub fn project_rect(&self, rect: &Rect<f64>) -> Rect<f64> {
        Rect::new(self.project(rect.min()), self.project(rect.max()))
    }
}
