mod polygon;
mod proj;
mod ring;

pub use polygon::PolygonMetrics;
pub use proj::LocalProjection;
pub use ring::RingMetrics;
