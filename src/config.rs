use thiserror::Error;

/// Length of one degree of latitude, in meters.
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Size of one ping (the local land-measurement unit), in square meters.
pub const M2_PER_PING: f64 = 3.305785;

/// Errors raised when constructing an `AnalysisConfig` from unusable constants.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("meters_per_degree_lat must be finite and positive, got {0}")]
    MetersPerDegree(f64),

    #[error("m2_per_local_unit must be finite and positive, got {0}")]
    LocalUnit(f64),
}

/// Constants used by an analysis call.
///
/// The value is immutable and `Copy`: each call receives its own, so calls
/// running on different threads never share configuration state. Fields are
/// only set through `new` or `Default`, so every instance holds finite,
/// positive constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    meters_per_degree_lat: f64,
    m2_per_local_unit: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            meters_per_degree_lat: METERS_PER_DEGREE_LAT,
            m2_per_local_unit: M2_PER_PING,
        }
    }
}

impl AnalysisConfig {
    /// Build a config, rejecting non-finite or non-positive constants.
    pub fn new(meters_per_degree_lat: f64, m2_per_local_unit: f64) -> Result<Self, ConfigError> {
        if !(meters_per_degree_lat.is_finite() && meters_per_degree_lat > 0.0) {
            return Err(ConfigError::MetersPerDegree(meters_per_degree_lat))
        }
        if !(m2_per_local_unit.is_finite() && m2_per_local_unit > 0.0) {
            return Err(ConfigError::LocalUnit(m2_per_local_unit))
        }
        Ok(Self { meters_per_degree_lat, m2_per_local_unit })
    }

    /// Meters per degree of latitude; longitude scales this by `cos(lat)`.
    #[inline] pub fn meters_per_degree_lat(&self) -> f64 { self.meters_per_degree_lat }

    /// Square meters per local area unit (ping).
    #[inline] pub fn m2_per_local_unit(&self) -> f64 { self.m2_per_local_unit }

    /// Convert an area in square meters to local units.
    #[inline]
    pub fn to_local_units(&self, area_m2: f64) -> f64 { area_m2 / self.m2_per_local_unit }
}
