//! Suite Execution
//!
//! Runs a plan's experiments in order, writing each experiment's trace
//! through the shared sink, collecting per-experiment duration and recorded
//! measurements, and assembling the final report with run metadata.

use crate::planner::ExecutionPlan;
use chrono::Utc;
use perflab_core::{ExperimentCtx, ExperimentParams, Sink, Stopwatch};
use perflab_report::{ExperimentRecord, Report, ReportMeta, ReportSummary, SystemInfo};

/// Run every experiment in the plan and build the report.
pub fn run_plan(plan: &ExecutionPlan<'_>, sink: &Sink, params: &ExperimentParams) -> Report {
    let total = Stopwatch::start();
    let mut records = Vec::with_capacity(plan.experiments.len());

    for def in &plan.experiments {
        tracing::debug!(id = def.id, "running experiment");
        sink.line(format!(
            "---------------------\n{}\n---------------------",
            def.name
        ));

        let mut ctx = ExperimentCtx::new(sink.clone(), params.clone());
        let watch = Stopwatch::start();
        (def.runner_fn)(&mut ctx);
        let duration_ms = watch.elapsed_millis();

        tracing::debug!(id = def.id, duration_ms, "experiment finished");
        records.push(ExperimentRecord {
            id: def.id.to_string(),
            name: def.name.to_string(),
            suite: def.suite,
            duration_ms,
            measurements: ctx.take_measurements(),
        });
    }

    let total_duration_ms = total.elapsed_millis();
    Report {
        meta: build_report_meta(),
        summary: ReportSummary {
            total_experiments: records.len(),
            total_duration_ms,
        },
        records,
    }
}

/// Build report metadata: version, timestamp, and system details.
///
/// Linux-specific data (CPU model, memory) gracefully degrades on other
/// platforms, returning "Unknown" or 0 values.
pub fn build_report_meta() -> ReportMeta {
    let system = SystemInfo {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        cpu: cpu_model().unwrap_or_else(|| "Unknown".to_string()),
        cpu_cores: num_cpus(),
        memory_gb: memory_gb().unwrap_or(0.0),
    };

    ReportMeta {
        schema_version: 1,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        system,
    }
}

/// Get CPU model name from /proc/cpuinfo (Linux only)
fn cpu_model() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/cpuinfo")
            .ok()
            .and_then(|content| {
                content
                    .lines()
                    .find(|l| l.starts_with("model name"))
                    .and_then(|l| l.split(':').nth(1))
                    .map(|s| s.trim().to_string())
            })
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

/// Get number of available CPU cores
fn num_cpus() -> u32 {
    std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(1)
}

/// Get total system memory in GB (Linux only)
fn memory_gb() -> Option<f64> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/meminfo")
            .ok()
            .and_then(|content| {
                content
                    .lines()
                    .find(|l| l.starts_with("MemTotal"))
                    .and_then(|l| {
                        l.split_whitespace()
                            .nth(1)
                            .and_then(|s| s.parse::<u64>().ok())
                    })
                    .map(|kb| kb as f64 / 1024.0 / 1024.0)
            })
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::build_plan;
    use perflab_core::{ExperimentDef, Suite};

    fn record_one(ctx: &mut ExperimentCtx) {
        ctx.sink.line("hello from the experiment");
        ctx.record_millis("only pass", 7);
    }

    #[test]
    fn run_plan_collects_records_in_order() {
        let defs = [
            ExperimentDef {
                id: "threads/first",
                name: "first",
                suite: Suite::Threads,
                order: 0,
                summary: "",
                runner_fn: record_one,
            },
            ExperimentDef {
                id: "threads/second",
                name: "second",
                suite: Suite::Threads,
                order: 1,
                summary: "",
                runner_fn: record_one,
            },
        ];
        let plan = build_plan(defs.iter(), Some(Suite::Threads), None);
        let sink = Sink::memory();

        let report = run_plan(&plan, &sink, &ExperimentParams::reduced());

        assert_eq!(report.summary.total_experiments, 2);
        let ids: Vec<_> = report.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["threads/first", "threads/second"]);
        assert!(report.records.iter().all(|r| r.measurements.len() == 1));

        // Each experiment gets a header plus its own trace line.
        let snapshot = sink.snapshot();
        assert_eq!(snapshot.len(), 4);
        assert!(snapshot[0].contains("first"));
    }

    #[test]
    fn report_meta_is_populated() {
        let meta = build_report_meta();
        assert_eq!(meta.schema_version, 1);
        assert!(!meta.version.is_empty());
        assert!(meta.system.cpu_cores >= 1);
        assert!(!meta.system.os.is_empty());
    }
}
