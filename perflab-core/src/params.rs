//! Experiment workload parameters.
//!
//! The defaults reproduce the classroom-scale demonstrations; a
//! `perflab.toml` can shrink them for quick runs, and tests use
//! [`ExperimentParams::reduced`].

use serde::{Deserialize, Serialize};

/// Sizes and durations for one run of the suites.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentParams {
    /// Counter iterations in the sleep experiment.
    pub sleep_iterations: u32,
    /// Pause between counter lines, in milliseconds.
    pub sleep_interval_ms: u64,
    /// Upper bound on interrupt-experiment iterations.
    pub interrupt_iterations: u64,
    /// Outer loop length in the join experiment.
    pub join_outer_count: u32,
    /// Outer index at which the join experiment spawns its worker.
    pub join_spawn_at: u32,
    /// How long the join experiment's worker sleeps, in milliseconds.
    pub join_sleep_ms: u64,
    /// Element count of the false-sharing buffer.
    pub shared_len: usize,
    /// The false-sharing writer touches every `writer_stride`-th element.
    pub writer_stride: usize,
    /// Element count of the cache-flush scratch buffer.
    pub flush_len: usize,
    /// Progress marker interval while scanning the flush buffer.
    pub flush_progress_step: usize,
    /// Rows (and columns) of the locality matrix.
    pub matrix_dim: usize,
}

impl Default for ExperimentParams {
    fn default() -> Self {
        Self {
            sleep_iterations: 5,
            sleep_interval_ms: 1_000,
            interrupt_iterations: 10_000_000,
            join_outer_count: 10,
            join_spawn_at: 5,
            join_sleep_ms: 2_000,
            shared_len: 100_000_000,
            writer_stride: 10,
            flush_len: 10_000_000,
            flush_progress_step: 1_000_000,
            matrix_dim: 10_000,
        }
    }
}

impl ExperimentParams {
    /// Reduced sizes for tests and smoke runs; same shapes, milliseconds
    /// instead of seconds, thousands instead of millions.
    pub fn reduced() -> Self {
        Self {
            sleep_interval_ms: 5,
            interrupt_iterations: 100_000,
            join_sleep_ms: 20,
            shared_len: 100_000,
            flush_len: 10_000,
            flush_progress_step: 1_000,
            matrix_dim: 100,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demonstrations() {
        let params = ExperimentParams::default();
        assert_eq!(params.sleep_iterations, 5);
        assert_eq!(params.interrupt_iterations, 10_000_000);
        assert_eq!(params.shared_len, 100_000_000);
        assert_eq!(params.flush_len, 10_000_000);
        assert_eq!(params.matrix_dim, 10_000);
    }

    #[test]
    fn reduced_keeps_counts_that_define_shape() {
        let params = ExperimentParams::reduced();
        assert_eq!(params.sleep_iterations, 5);
        assert_eq!(params.join_outer_count, 10);
        assert_eq!(params.join_spawn_at, 5);
        assert!(params.shared_len < ExperimentParams::default().shared_len);
    }
}
