//! Error types for polygon analysis.

use serde::Serialize;
use thiserror::Error;

/// Errors that terminate an analysis call.
///
/// Every variant describes malformed or non-analyzable input. None are
/// transient, so callers should never retry.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalysisError {
    /// The geometry `type` is something other than `"Polygon"`.
    #[error("unsupported geometry type: {0}")]
    UnsupportedGeometryType(String),

    /// Malformed coordinates array, wrong arity, non-finite or out-of-range values.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The first and last positions of a ring differ.
    #[error("ring {ring} is not closed: first and last positions differ")]
    UnclosedRing { ring: usize },

    /// A ring with fewer than three distinct vertices.
    #[error("ring {ring} is degenerate: {distinct} distinct vertices, at least 3 required")]
    DegenerateRing { ring: usize, distinct: usize },
}

/// Machine-readable error tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    UnsupportedGeometryType,
    InvalidGeometry,
    UnclosedRing,
    DegenerateRing,
}

/// Failure record handed back across the transport boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub detail: String,
}

impl AnalysisError {
    pub(crate) fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidGeometry(detail.into())
    }

    /// Get the error tag.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedGeometryType(_) => ErrorKind::UnsupportedGeometryType,
            Self::InvalidGeometry(_) => ErrorKind::InvalidGeometry,
            Self::UnclosedRing { .. } => ErrorKind::UnclosedRing,
            Self::DegenerateRing { .. } => ErrorKind::DegenerateRing,
        }
    }

    /// HTTP-style status for the failure. All kinds are client errors.
    #[inline]
    pub fn status(&self) -> u16 { 400 }

    /// Build the tagged response record with a human-readable detail string.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse { kind: self.kind(), detail: self.to_string() }
    }
}
