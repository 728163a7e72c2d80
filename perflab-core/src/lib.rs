#![warn(missing_docs)]
//! Perflab Core - Experiment Runtime
//!
//! This crate provides the execution environment for experiments:
//! - `Instant`/`Stopwatch` timing (hardware cycle counters where available)
//! - `CancelToken` for cooperative cancellation and interruptible sleep
//! - `Worker` named OS threads whose joins report failure instead of raising
//! - `Sink` serialized line output shared by concurrent workers
//! - the experiment registry (`ExperimentDef` collected via `inventory`)

mod cancel;
mod measure;
mod params;
mod sink;
mod worker;

pub use cancel::{CancelToken, Interrupted};
pub use measure::HAS_CYCLE_COUNTER;
pub use measure::{pin_to_cpu, Instant, Stopwatch};
pub use params::ExperimentParams;
pub use sink::Sink;
pub use worker::{Runnable, Worker};

use serde::{Deserialize, Serialize};

/// Suite an experiment belongs to. Each suite runs as one CLI command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suite {
    /// Thread lifecycle demonstrations (creation, sleep, interrupt, join).
    Threads,
    /// Cache behavior demonstrations (repeated access, false sharing, locality).
    Memory,
}

impl Suite {
    /// Stable lowercase name, as used in experiment ids and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Suite::Threads => "threads",
            Suite::Memory => "memory",
        }
    }
}

impl std::fmt::Display for Suite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit of a recorded timing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Nanosecond-resolution single-point timing.
    Nanos,
    /// Millisecond-resolution interval timing.
    Millis,
}

/// A single labelled timing captured by an experiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    /// What was measured (e.g. "contended sum").
    pub label: String,
    /// Magnitude in `unit`.
    pub value: u64,
    /// Resolution of `value`.
    pub unit: TimeUnit,
}

/// Context handed to every experiment run.
///
/// Carries the output sink, the workload parameters, and accumulates the
/// measurements the experiment records along the way.
pub struct ExperimentCtx {
    /// Where trace lines go. Clone freely into workers.
    pub sink: Sink,
    /// Workload sizes and durations for this run.
    pub params: ExperimentParams,
    measurements: Vec<Measurement>,
}

impl ExperimentCtx {
    /// Create a context for one experiment invocation.
    pub fn new(sink: Sink, params: ExperimentParams) -> Self {
        Self {
            sink,
            params,
            measurements: Vec::new(),
        }
    }

    /// Record a nanosecond-resolution point measurement.
    pub fn record_nanos(&mut self, label: &str, nanos: u64) {
        self.measurements.push(Measurement {
            label: label.to_string(),
            value: nanos,
            unit: TimeUnit::Nanos,
        });
    }

    /// Record a millisecond-resolution interval measurement.
    pub fn record_millis(&mut self, label: &str, millis: u64) {
        self.measurements.push(Measurement {
            label: label.to_string(),
            value: millis,
            unit: TimeUnit::Millis,
        });
    }

    /// Measurements recorded so far.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Take ownership of the recorded measurements.
    pub fn take_measurements(&mut self) -> Vec<Measurement> {
        std::mem::take(&mut self.measurements)
    }
}

/// Experiment registered at link time.
#[derive(Debug, Clone)]
pub struct ExperimentDef {
    /// Unique identifier, `<suite>/<name>` style.
    pub id: &'static str,
    /// Human-readable name used in trace headers.
    pub name: &'static str,
    /// Suite this experiment belongs to.
    pub suite: Suite,
    /// Position within the suite's fixed execution order.
    pub order: u32,
    /// One-line description shown by `list`.
    pub summary: &'static str,
    /// The experiment body.
    pub runner_fn: fn(&mut ExperimentCtx),
}

inventory::collect!(ExperimentDef);

/// All experiments linked into the current binary.
pub fn registered_experiments() -> Vec<&'static ExperimentDef> {
    inventory::iter::<ExperimentDef>.into_iter().collect()
}

/// Anchor to prevent LTO from stripping inventory entries
#[used]
#[doc(hidden)]
pub static REGISTRY_ANCHOR: fn() = || {
    for _ in inventory::iter::<ExperimentDef> {}
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctx_accumulates_measurements() {
        let mut ctx = ExperimentCtx::new(Sink::memory(), ExperimentParams::default());
        ctx.record_nanos("first read", 120);
        ctx.record_millis("full pass", 35);

        assert_eq!(ctx.measurements().len(), 2);
        assert_eq!(ctx.measurements()[0].unit, TimeUnit::Nanos);
        assert_eq!(ctx.measurements()[1].unit, TimeUnit::Millis);

        let taken = ctx.take_measurements();
        assert_eq!(taken.len(), 2);
        assert!(ctx.measurements().is_empty());
    }

    #[test]
    fn suite_names_are_stable() {
        assert_eq!(Suite::Threads.as_str(), "threads");
        assert_eq!(Suite::Memory.to_string(), "memory");
    }
}
