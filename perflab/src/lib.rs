#![warn(missing_docs)]
//! # Perflab
//!
//! Teaching experiments for thread lifecycle operations (creation, sleep,
//! interrupt, join) and memory/cache performance phenomena (cache-miss
//! latency, false sharing, spatial locality), on a small reusable harness
//! for multi-threaded timing experiments.
//!
//! ## Quick Start
//!
//! ```text
//! perflab threads        # run the thread lifecycle suite
//! perflab memory         # run the cache behavior suite
//! perflab list           # show the experiment plan
//! perflab memory --format json -o report.json
//! ```
//!
//! Experiments can also be driven directly as a library, which is how the
//! tests run them against a capturing sink:
//!
//! ```
//! use perflab::{ExperimentCtx, ExperimentParams, Sink};
//!
//! let sink = Sink::memory();
//! let mut ctx = ExperimentCtx::new(sink.clone(), ExperimentParams::reduced());
//! perflab::suites::threads::creation(&mut ctx);
//! assert_eq!(sink.snapshot().iter().filter(|l| l.starts_with("Hello")).count(), 3);
//! ```

// Re-export core types
pub use perflab_core::{
    pin_to_cpu, registered_experiments, CancelToken, ExperimentCtx, ExperimentDef,
    ExperimentParams, Instant, Interrupted, Measurement, Runnable, Sink, Stopwatch, Suite,
    TimeUnit, Worker, HAS_CYCLE_COUNTER,
};

// Re-export reporting
pub use perflab_report::{
    format_duration, format_human_output, format_measurement, generate_json_report, ExperimentRecord,
    OutputFormat, Report, ReportError, ReportMeta, ReportSummary, SystemInfo,
};

// Re-export the CLI entry points
pub use perflab_cli::{build_plan, build_report_meta, run, run_plan, ExecutionPlan, PerflabConfig};

/// The experiment suites; linking this module's crate registers them.
pub use perflab_suites as suites;
