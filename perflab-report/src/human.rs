//! Human-readable output formatting.

use crate::report::Report;
use perflab_core::{Measurement, TimeUnit};

/// Format a report for terminal display, grouped by suite.
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("Perflab Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    let mut suites: std::collections::BTreeMap<&str, Vec<&crate::ExperimentRecord>> =
        std::collections::BTreeMap::new();
    for record in &report.records {
        suites.entry(record.suite.as_str()).or_default().push(record);
    }

    for (suite, records) in suites {
        output.push_str(&format!("Suite: {}\n", suite));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for record in records {
            output.push_str(&format!("  ✓ {} ({} ms)\n", record.id, record.duration_ms));
            for measurement in &record.measurements {
                output.push_str(&format!(
                    "      {}: {}\n",
                    measurement.label,
                    format_measurement(measurement)
                ));
            }
            output.push('\n');
        }
    }

    output.push_str("Summary\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  Experiments: {}  Total time: {} ms\n",
        report.summary.total_experiments, report.summary.total_duration_ms
    ));

    output
}

/// Render one measurement in its native resolution.
pub fn format_measurement(measurement: &Measurement) -> String {
    match measurement.unit {
        TimeUnit::Nanos => format_duration(measurement.value as f64),
        TimeUnit::Millis => format!("{} ms", measurement.value),
    }
}

/// Format nanoseconds with an adaptive unit.
pub fn format_duration(ns: f64) -> String {
    if ns < 1_000.0 {
        format!("{:.0} ns", ns)
    } else if ns < 1_000_000.0 {
        format!("{:.2} µs", ns / 1_000.0)
    } else if ns < 1_000_000_000.0 {
        format!("{:.2} ms", ns / 1_000_000.0)
    } else {
        format!("{:.2} s", ns / 1_000_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ExperimentRecord, ReportMeta, ReportSummary, SystemInfo};
    use perflab_core::Suite;

    #[test]
    fn duration_picks_the_right_unit() {
        assert_eq!(format_duration(850.0), "850 ns");
        assert_eq!(format_duration(1_500.0), "1.50 µs");
        assert_eq!(format_duration(2_500_000.0), "2.50 ms");
        assert_eq!(format_duration(3_000_000_000.0), "3.00 s");
    }

    #[test]
    fn human_output_lists_each_record() {
        let report = Report {
            meta: ReportMeta {
                schema_version: 1,
                version: "0.1.0".to_string(),
                timestamp: chrono::Utc::now(),
                system: SystemInfo {
                    os: "linux".to_string(),
                    arch: "x86_64".to_string(),
                    cpu: "test".to_string(),
                    cpu_cores: 2,
                    memory_gb: 4.0,
                },
            },
            records: vec![
                ExperimentRecord {
                    id: "threads/creation".to_string(),
                    name: "thread creation".to_string(),
                    suite: Suite::Threads,
                    duration_ms: 3,
                    measurements: vec![],
                },
                ExperimentRecord {
                    id: "threads/join".to_string(),
                    name: "join".to_string(),
                    suite: Suite::Threads,
                    duration_ms: 2005,
                    measurements: vec![Measurement {
                        label: "inner sleep".to_string(),
                        value: 2_000,
                        unit: TimeUnit::Millis,
                    }],
                },
            ],
            summary: ReportSummary {
                total_experiments: 2,
                total_duration_ms: 2010,
            },
        };

        let text = format_human_output(&report);
        assert!(text.contains("Suite: threads"));
        assert!(text.contains("threads/creation"));
        assert!(text.contains("inner sleep: 2000 ms"));
        assert!(text.contains("Experiments: 2"));
    }
}
