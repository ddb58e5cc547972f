use ahash::AHashSet;
use geo::{BoundingRect, Coord, LineString, Rect};

use crate::error::AnalysisError;

/// Planar measurements of a single closed ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingMetrics {
    /// Shoelace area in m², positive for counter-clockwise winding.
    pub signed_area: f64,
    /// Sum of edge lengths in m.
    pub perimeter: f64,
    /// Bounding box of the source ring in lon/lat degrees.
    pub bounds: Rect<f64>,
}

impl RingMetrics {
    /// Measure a ring given its source (degrees) and projected (meters) forms.
    ///
    /// `index` identifies the ring in errors: 0 is the exterior, holes follow.
    /// Fails with `DegenerateRing` when fewer than 3 distinct vertices remain.
    pub fn compute(index: usize, source: &LineString<f64>, projected: &LineString<f64>) -> Result<Self, AnalysisError> {
        let distinct = distinct_vertices(&source.0);
        if distinct < 3 {
            return Err(AnalysisError::DegenerateRing { ring: index, distinct })
        }

        let bounds = source.bounding_rect()
            .ok_or(AnalysisError::DegenerateRing { ring: index, distinct })?;

        Ok(Self {
            signed_area: signed_area(&projected.0),
            perimeter: perimeter(&projected.0),
            bounds,
        })
    }

    /// Unsigned area in m².
    #[inline] pub fn area(&self) -> f64 { self.signed_area.abs() }

    /// Returns `true` if the ring winds counter-clockwise.
    #[inline] pub fn is_ccw(&self) -> bool { self.signed_area > 0.0 }
}

/// Count distinct vertices; `-0.0` and `0.0` compare equal.
fn distinct_vertices(coords: &[Coord<f64>]) -> usize {
    coords.iter()
        .map(|c| ((c.x + 0.0).to_bits(), (c.y + 0.0).to_bits()))
        .collect::<AHashSet<_>>()
        .len()
}

/// Get the signed area of a closed coordinate list (shoelace formula).
pub(crate) fn signed_area(pts: &[Coord<f64>]) -> f64 {
    let mut a = 0.0;
    for w in pts.windows(2) {
        a += w[0].x * w[1].y - w[1].x * w[0].y;
    }
    a / 2.0
}

/// Get the length of a closed coordinate list.
pub(crate) fn perimeter(pts: &[Coord<f64>]) -> f64 {
    pts.windows(2)
        .map(|w| (w[1].x - w[0].x).hypot(w[1].y - w[0].y))
        .sum()
}
