//! Experiment Planner
//!
//! Filters registered experiments down to a suite (with an optional regex on
//! the id) and orders them deterministically: suite, then the experiment's
//! fixed position within it, then id.

use perflab_core::{ExperimentDef, Suite};

/// Ordered list of experiments to run
pub struct ExecutionPlan<'a> {
    /// Experiments in execution order.
    pub experiments: Vec<&'a ExperimentDef>,
}

/// Build an execution plan from the given experiments.
pub fn build_plan<'a>(
    experiments: impl IntoIterator<Item = &'a ExperimentDef>,
    suite: Option<Suite>,
    filter: Option<&regex::Regex>,
) -> ExecutionPlan<'a> {
    let mut selected: Vec<_> = experiments
        .into_iter()
        .filter(|e| {
            if let Some(wanted) = suite {
                if e.suite != wanted {
                    return false;
                }
            }

            if let Some(re) = filter {
                if !re.is_match(e.id) {
                    return false;
                }
            }

            true
        })
        .collect();

    selected.sort_by_key(|e| (e.suite as u8, e.order, e.id));

    ExecutionPlan {
        experiments: selected,
    }
}
