use std::path::PathBuf;

use sitemetrics::{AnalysisConfig, ConfigError, M2_PER_PING, METERS_PER_DEGREE_LAT};

/// Site boundary metrics CLI
#[derive(clap::Parser, Debug)]
#[command(name = "sitemetrics", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity on stderr (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Compute area, perimeter and shape indices for a GeoJSON polygon
    Analyze(AnalyzeArgs),

    /// Validate a GeoJSON polygon without measuring it
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// GeoJSON Polygon, Feature or FeatureCollection file, or "-" for stdin
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Meters per degree of latitude
    #[arg(long, default_value_t = METERS_PER_DEGREE_LAT)]
    pub meters_per_degree: f64,

    /// Square meters per local area unit (ping)
    #[arg(long, default_value_t = M2_PER_PING)]
    pub m2_per_unit: f64,
}

impl AnalyzeArgs {
    /// Build the analysis constants from the command-line flags.
    pub fn config(&self) -> Result<AnalysisConfig, ConfigError> {
        AnalysisConfig::new(self.meters_per_degree, self.m2_per_unit)
    }
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// GeoJSON Polygon file, or "-" for stdin
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,
}
