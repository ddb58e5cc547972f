use std::f64::consts::PI;

use geo::Rect;

use crate::geom::{LocalProjection, RingMetrics};

/// Net measurements of a polygon with optional holes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonMetrics {
    /// Exterior area minus hole areas, floored at 0, in m².
    pub area: f64,
    /// Exterior ring perimeter in m. Holes do not contribute.
    pub perimeter: f64,
    /// Exterior bounding box in lon/lat degrees.
    pub bounds: Rect<f64>,
    /// Area of `bounds` in the projected frame, in m².
    pub bounds_area: f64,
    /// Width and height of `bounds` in the projected frame, in m.
    pub bounds_size: (f64, f64),
}

impl PolygonMetrics {
    /// Combine exterior and hole ring metrics.
    ///
    /// A hole larger than the exterior is clamped to zero net area and logged
    /// rather than rejected.
    pub fn aggregate(exterior: &RingMetrics, holes: &[RingMetrics], projection: &LocalProjection) -> Self {
        let exterior_area = exterior.area();
        let holes_area: f64 = holes.iter().map(RingMetrics::area).sum();

        let mut area = exterior_area - holes_area;
        if area < 0.0 {
            tracing::warn!(exterior_area, holes_area, "hole area exceeds exterior area, clamping to zero");
            area = 0.0;
        }

        let projected = projection.project_rect(&exterior.bounds);

        Self {
            area,
            perimeter: exterior.perimeter,
            bounds: exterior.bounds,
            bounds_area: projected.width() * projected.height(),
            bounds_size: (projected.width(), projected.height()),
        }
    }

    /// Fraction of the bounding box covered by the polygon.
    /// Zero when the bounding box has no area.
    pub fn ratio(&self) -> f64 {
        if self.bounds_area > 0.0 { self.area / self.bounds_area } else { 0.0 }
    }

    /// Compute the Polsby-Popper compactness score.
    /// Formula: 4 * pi * area / (perimeter^2)
    /// If the perimeter is zero, returns `None`.
    pub fn polsby_popper(&self) -> Option<f64> {
        if self.perimeter == 0.0 { return None }
        Some(4.0 * PI * self.area / (self.perimeter * self.perimeter))
    }

    /// Ratio of the longer to the shorter bounding box side (>= 1).
    /// If either side is zero, returns `None`.
    pub fn aspect_ratio(&self) -> Option<f64> {
        let (width, height) = self.bounds_size;
        if width == 0.0 || height == 0.0 { return None }
        Some((width / height).max(height / width))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use geo::Coord;
    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use super::*;
    use crate::config::AnalysisConfig;

    /// An event seen by `EventCapture`: its level and the names of its fields.
    #[derive(Debug, Clone)]
    struct CapturedEvent {
        level: tracing::Level,
        fields: Vec<&'static str>,
    }

    #[derive(Clone, Default)]
    struct EventCapture(Arc<Mutex<Vec<CapturedEvent>>>);

    struct FieldNames(Vec<&'static str>);

    impl Visit for FieldNames {
        fn record_debug(&mut self, field: &Field, _value: &dyn std::fmt::Debug) {
            self.0.push(field.name());
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for EventCapture {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = FieldNames(Vec::new());
            event.record(&mut fields);
            self.0.lock().unwrap().push(CapturedEvent { level: *event.metadata().level(), fields: fields.0 });
        }
    }

    /// Run `f` with a thread-local subscriber and return the events it emitted.
    fn capture_events(f: impl FnOnce()) -> Vec<CapturedEvent> {
        let capture = EventCapture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        tracing::subscriber::with_default(subscriber, f);
        capture.0.lock().unwrap().clone()
    }

    fn equator() -> LocalProjection {
        LocalProjection::new(Coord { x: 0.0, y: 0.0 }, &AnalysisConfig::default())
    }

    fn ring(signed_area: f64, perimeter: f64, min: (f64, f64), max: (f64, f64)) -> RingMetrics {
        RingMetrics {
            signed_area,
            perimeter,
            bounds: Rect::new(Coord::from(min), Coord::from(max)),
        }
    }

    #[test]
    fn holes_subtract_area_but_not_perimeter() {
        let exterior = ring(1000.0, 140.0, (0.0, 0.0), (0.001, 0.001));
        let holes = [ring(-100.0, 40.0, (0.0002, 0.0002), (0.0003, 0.0003)), ring(50.0, 30.0, (0.0, 0.0), (0.0001, 0.0001))];
        let metrics = PolygonMetrics::aggregate(&exterior, &holes, &equator());
        assert_eq!(metrics.area, 850.0);
        assert_eq!(metrics.perimeter, 140.0);
    }

    #[test]
    fn oversized_hole_clamps_to_zero() {
        let exterior = ring(-500.0, 100.0, (0.0, 0.0), (0.001, 0.001));
        let holes = [ring(600.0, 110.0, (0.0, 0.0), (0.001, 0.001))];
        let metrics = PolygonMetrics::aggregate(&exterior, &holes, &equator());
        assert_eq!(metrics.area, 0.0);
        assert_eq!(metrics.polsby_popper(), Some(0.0));
    }

    #[test]
    fn clamping_logs_one_warning() {
        let exterior = ring(-500.0, 100.0, (0.0, 0.0), (0.001, 0.001));
        let holes = [ring(600.0, 110.0, (0.0, 0.0), (0.001, 0.001))];
        let events = capture_events(|| {
            PolygonMetrics::aggregate(&exterior, &holes, &equator());
        });

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, tracing::Level::WARN);
        assert!(events[0].fields.contains(&"exterior_area"));
        assert!(events[0].fields.contains(&"holes_area"));
    }

    #[test]
    fn non_negative_net_area_logs_nothing() {
        let exterior = ring(1000.0, 140.0, (0.0, 0.0), (0.001, 0.001));
        let holes = [ring(-1000.0, 140.0, (0.0, 0.0), (0.001, 0.001))];
        let events = capture_events(|| {
            let metrics = PolygonMetrics::aggregate(&exterior, &holes, &equator());
            assert_eq!(metrics.area, 0.0);
        });
        assert!(events.is_empty());
    }

    #[test]
    fn ratio_uses_projected_bounds() {
        let exterior = ring(111.32 * 111.32 / 2.0, 400.0, (0.0, 0.0), (0.001, 0.001));
        let metrics = PolygonMetrics::aggregate(&exterior, &[], &equator());
        assert!((metrics.bounds_area - 111.32 * 111.32).abs() < 1e-6);
        assert!((metrics.ratio() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn flat_bounds_have_zero_ratio_and_no_aspect_ratio() {
        let exterior = ring(0.0, 10.0, (0.0, 0.0), (0.001, 0.0));
        let metrics = PolygonMetrics::aggregate(&exterior, &[], &equator());
        assert_eq!(metrics.ratio(), 0.0);
        assert_eq!(metrics.aspect_ratio(), None);
    }

    #[test]
    fn zero_perimeter_has_no_compactness() {
        let exterior = ring(0.0, 0.0, (0.0, 0.0), (0.0, 0.0));
        let metrics = PolygonMetrics::aggregate(&exterior, &[], &equator());
        assert_eq!(metrics.polsby_popper(), None);
    }

    #[test]
    fn square_compactness_is_pi_over_four() {
        let exterior = ring(100.0, 40.0, (0.0, 0.0), (0.0001, 0.0001));
        let metrics = PolygonMetrics::aggregate(&exterior, &[], &equator());
        assert!((metrics.polsby_popper().unwrap() - PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn aspect_ratio_is_orientation_free() {
        let wide = ring(2.0, 6.0, (0.0, 0.0), (0.002, 0.001));
        let tall = ring(2.0, 6.0, (0.0, 0.0), (0.001, 0.002));
        let wide = PolygonMetrics::aggregate(&wide, &[], &equator()).aspect_ratio().unwrap();
        let tall = PolygonMetrics::aggregate(&tall, &[], &equator()).aspect_ratio().unwrap();
        assert!((wide - 2.0).abs() < 1e-9);
        assert!((tall - 2.0).abs() < 1e-9);
    }
}
