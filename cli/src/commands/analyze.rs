use std::process::ExitCode;

use anyhow::Result;
use serde_json::Value;
use sitemetrics::{analyze_batch, analyze_with, AnalysisConfig, AnalysisResult};

use super::{parse_document, print_json, read_input, Outcome};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::AnalyzeArgs) -> Result<ExitCode> {
    let config = args.config()?;

    tracing::info!(input = %args.input.display(), "reading geometry");
    let text = read_input(&args.input)?;

    let (output, ok) = match parse_document(&text) {
        Ok(document) => analyze_document(&document, &config),
        Err(e) => {
            let outcome = Outcome::<AnalysisResult>::from(Err(e));
            (serde_json::to_value(&outcome)?, false)
        }
    };
    print_json(&output, args.pretty)?;

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::from(2) })
}

/// Analyze a bare geometry, a `Feature`, or every feature of a `FeatureCollection`.
///
/// Returns the JSON output and whether every geometry was analyzed successfully.
/// Collections produce an array with one entry per feature, in feature order.
pub(crate) fn analyze_document(document: &Value, config: &AnalysisConfig) -> (Value, bool) {
    match document.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => {
            let geometries = document.get("features")
                .and_then(Value::as_array)
                .map(|features| features.iter()
                    .map(|feature| feature.get("geometry").cloned().unwrap_or(Value::Null))
                    .collect::<Vec<_>>())
                .unwrap_or_default();

            tracing::info!(features = geometries.len(), "analyzing feature collection");
            let outcomes = analyze_batch(&geometries, config).into_iter()
                .map(Outcome::from)
                .collect::<Vec<_>>();
            let ok = outcomes.iter().all(Outcome::is_ok);
            (serde_json::json!(outcomes), ok)
        }
        Some("Feature") => {
            let geometry = document.get("geometry").unwrap_or(&Value::Null);
            single(analyze_with(geometry, config))
        }
        _ => single(analyze_with(document, config)),
    }
}

fn single(result: Result<AnalysisResult, sitemetrics::AnalysisError>) -> (Value, bool) {
    let outcome = Outcome::from(result);
    let ok = outcome.is_ok();
    (serde_json::json!(outcome), ok)
}
