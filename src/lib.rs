#![doc = "Site metrics public API"]
mod analysis;
mod config;
mod error;
mod geojson;
mod geom;

#[doc(inline)]
pub use analysis::{analyze, analyze_batch, analyze_str, analyze_with, AnalysisResult};

#[doc(inline)]
pub use config::{AnalysisConfig, ConfigError, M2_PER_PING, METERS_PER_DEGREE_LAT};

#[doc(inline)]
pub use error::{AnalysisError, ErrorKind, ErrorResponse};

#[doc(inline)]
pub use geojson::parse_polygon;

#[doc(inline)]
pub use geom::{LocalProjection, PolygonMetrics, RingMetrics};
