//! Report Data Structures

use chrono::{DateTime, Utc};
use perflab_core::{Measurement, Suite};
use serde::{Deserialize, Serialize};

/// Complete run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Run metadata.
    pub meta: ReportMeta,
    /// One record per executed experiment, in execution order.
    pub records: Vec<ExperimentRecord>,
    /// Totals across the run.
    pub summary: ReportSummary,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Format version for downstream consumers.
    pub schema_version: u32,
    /// perflab version that produced the report.
    pub version: String,
    /// When the run finished.
    pub timestamp: DateTime<Utc>,
    /// Machine the run executed on.
    pub system: SystemInfo,
}

/// System information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system name.
    pub os: String,
    /// CPU architecture.
    pub arch: String,
    /// CPU model, where discoverable.
    pub cpu: String,
    /// Available hardware parallelism.
    pub cpu_cores: u32,
    /// Total system memory in GB (0.0 where undiscoverable).
    pub memory_gb: f64,
}

/// Result of one experiment invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentRecord {
    /// Experiment id, `<suite>/<name>` style.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Suite the experiment belongs to.
    pub suite: Suite,
    /// Wall-clock time the whole experiment took.
    pub duration_ms: u64,
    /// Timings the experiment recorded while running.
    pub measurements: Vec<Measurement>,
}

/// Totals across a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    /// How many experiments executed.
    pub total_experiments: usize,
    /// Wall-clock time for the run as a whole.
    pub total_duration_ms: u64,
}
