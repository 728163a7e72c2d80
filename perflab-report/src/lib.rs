#![warn(missing_docs)]
//! Perflab Report - run results and rendering
//!
//! Generates two output formats:
//! - Human-readable terminal text
//! - JSON (machine-readable)

mod human;
mod json;
mod report;

pub use human::{format_duration, format_human_output, format_measurement};
pub use json::{generate_json_report, ReportError};
pub use report::{ExperimentRecord, Report, ReportMeta, ReportSummary, SystemInfo};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON with full schema
    Json,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
