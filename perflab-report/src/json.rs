//! JSON Report Generation

use crate::report::Report;
use thiserror::Error;

/// Failure while rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Render the report as pretty-printed JSON.
pub fn generate_json_report(report: &Report) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ExperimentRecord, ReportMeta, ReportSummary, SystemInfo};
    use perflab_core::{Measurement, Suite, TimeUnit};

    fn sample_report() -> Report {
        Report {
            meta: ReportMeta {
                schema_version: 1,
                version: "0.1.0".to_string(),
                timestamp: chrono::Utc::now(),
                system: SystemInfo {
                    os: "linux".to_string(),
                    arch: "x86_64".to_string(),
                    cpu: "test".to_string(),
                    cpu_cores: 4,
                    memory_gb: 8.0,
                },
            },
            records: vec![ExperimentRecord {
                id: "memory/locality".to_string(),
                name: "locality".to_string(),
                suite: Suite::Memory,
                duration_ms: 1234,
                measurements: vec![Measurement {
                    label: "row-major pass".to_string(),
                    value: 321,
                    unit: TimeUnit::Millis,
                }],
            }],
            summary: ReportSummary {
                total_experiments: 1,
                total_duration_ms: 1250,
            },
        }
    }

    #[test]
    fn json_report_round_trips() {
        let report = sample_report();
        let json = generate_json_report(&report).expect("serializable report");

        let parsed: Report = serde_json::from_str(&json).expect("parsable report");
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].id, "memory/locality");
        assert_eq!(parsed.records[0].suite, Suite::Memory);
        assert_eq!(parsed.records[0].measurements[0].value, 321);
        assert_eq!(parsed.summary.total_experiments, 1);
    }

    #[test]
    fn suite_serializes_lowercase() {
        let json = generate_json_report(&sample_report()).expect("serializable report");
        assert!(json.contains("\"suite\": \"memory\""));
        assert!(json.contains("\"unit\": \"millis\""));
    }
}
