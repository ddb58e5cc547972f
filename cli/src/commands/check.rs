use std::process::ExitCode;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use sitemetrics::{parse_polygon, AnalysisError};

use super::{parse_document, print_json, read_input, Outcome};

/// Structure summary of a polygon that passed validation.
#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct CheckReport {
    pub holes: usize,
    pub vertices: usize,
}

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::CheckArgs) -> Result<ExitCode> {
    tracing::info!(input = %args.input.display(), "validating geometry");
    let text = read_input(&args.input)?;

    let outcome = Outcome::from(parse_document(&text).and_then(|document| check(&document)));
    print_json(&outcome, false)?;

    Ok(if outcome.is_ok() { ExitCode::SUCCESS } else { ExitCode::from(2) })
}

/// Validate a bare Polygon geometry and summarize its rings.
pub(crate) fn check(geometry: &Value) -> Result<CheckReport, AnalysisError> {
    let polygon = parse_polygon(geometry)?;
    Ok(CheckReport {
        holes: polygon.interiors().len(),
        vertices: polygon.exterior().0.len()
            + polygon.interiors().iter().map(|ring| ring.0.len()).sum::<usize>(),
    })
}
