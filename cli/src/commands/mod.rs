pub mod analyze;
pub mod check;

use std::{fs, io, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use sitemetrics::{AnalysisError, ErrorResponse};

/// Read the whole input document; `-` reads stdin.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        io::read_to_string(io::stdin()).context("failed to read stdin")
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

/// Parse the input text as JSON. Malformed text is reported like any other
/// invalid geometry.
pub(crate) fn parse_document(text: &str) -> Result<Value, AnalysisError> {
    serde_json::from_str(text)
        .map_err(|e| AnalysisError::InvalidGeometry(format!("malformed JSON: {e}")))
}

/// One entry of command output: the success payload or the tagged failure.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum Outcome<T> {
    Ok(T),
    Err(ErrorResponse),
}

impl<T> Outcome<T> {
    pub(crate) fn is_ok(&self) -> bool { matches!(self, Outcome::Ok(_)) }
}

impl<T> From<Result<T, AnalysisError>> for Outcome<T> {
    fn from(result: Result<T, AnalysisError>) -> Self {
        match result {
            Ok(value) => Outcome::Ok(value),
            Err(e) => {
                tracing::info!(kind = ?e.kind(), detail = %e, "geometry rejected");
                Outcome::Err(e.to_response())
            }
        }
    }
}

/// Serialize `value` to stdout followed by a newline.
pub(crate) fn print_json(value: &impl Serialize, pretty: bool) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}
