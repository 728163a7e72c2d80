//! Thread lifecycle experiments.
//!
//! Four demonstrations, run in registration order: spawning workers three
//! different ways, sleeping between counter lines, cooperative interruption,
//! and joining from the middle of a loop. Each blocks until its workers are
//! done; interruptions observed inside a worker are written to the sink and
//! swallowed.

use perflab_core::{CancelToken, ExperimentCtx, ExperimentDef, Runnable, Sink, Suite, Worker};
use std::hint::black_box;
use std::thread;
use std::time::Duration;

fn current_thread_name() -> String {
    thread::current().name().unwrap_or("unnamed").to_string()
}

/// Spawns the same greeting three ways (an inline closure, a pre-packaged
/// [`Runnable`] object, and a plain function item) and joins all three
/// before returning. Join order does not matter; only the barrier does.
pub fn creation(ctx: &mut ExperimentCtx) {
    let sink = ctx.sink.clone();
    sink.line(format!("current thread: {}", current_thread_name()));

    let closure_sink = sink.clone();
    let closure = Worker::spawn("closure-worker", move || {
        closure_sink.line(format!("current thread: {}", current_thread_name()));
        closure_sink.line("Hello from a closure!");
    });

    struct Greeting {
        sink: Sink,
    }
    impl Runnable for Greeting {
        fn run(self: Box<Self>) {
            self.sink
                .line(format!("current thread: {}", current_thread_name()));
            self.sink.line("Hello from a Runnable!");
        }
    }
    let runnable = Worker::spawn_runnable(
        "runnable-worker",
        Box::new(Greeting { sink: sink.clone() }),
    );

    fn greet(sink: Sink) {
        sink.line(format!("current thread: {}", current_thread_name()));
        sink.line("Hello from a fn item!");
    }
    let fn_sink = sink.clone();
    let function = Worker::spawn("fn-worker", move || greet(fn_sink));

    for worker in [closure, runnable, function] {
        worker.join();
    }
}

inventory::submit! {
    ExperimentDef {
        id: "threads/creation",
        name: "thread creation",
        suite: Suite::Threads,
        order: 0,
        summary: "spawn three workers three ways and join them all",
        runner_fn: creation,
    }
}

/// One worker counts upward, pausing between lines with an interruptible
/// sleep. A cut-short sleep ends the count early; fatal to the worker,
/// invisible to the caller, which just joins.
pub fn sleep(ctx: &mut ExperimentCtx) {
    let token = CancelToken::new();
    let iterations = ctx.params.sleep_iterations;
    let interval = Duration::from_millis(ctx.params.sleep_interval_ms);

    let worker_sink = ctx.sink.clone();
    let worker_token = token.clone();
    let worker = Worker::spawn("sleep-worker", move || {
        worker_sink.line(format!("current thread: {}", current_thread_name()));
        for i in 0..iterations {
            worker_sink.line(format!("{i}"));
            if let Err(err) = worker_token.sleep(interval) {
                worker_sink.line(format!("sleep cut short: {err}"));
                break;
            }
        }
    });

    worker.join();
}

inventory::submit! {
    ExperimentDef {
        id: "threads/sleep",
        name: "sleep",
        suite: Suite::Threads,
        order: 1,
        summary: "count with a blocking sleep between lines",
        runner_fn: sleep,
    }
}

/// The spawning thread requests cancellation immediately after the spawn.
/// The worker polls the token every iteration and may process anywhere from
/// zero to all of them before observing the request; the caller joins
/// unconditionally either way.
pub fn interrupt(ctx: &mut ExperimentCtx) {
    let sink = ctx.sink.clone();
    let token = CancelToken::new();
    let limit = ctx.params.interrupt_iterations;

    let worker_sink = sink.clone();
    let worker_token = token.clone();
    let worker = Worker::spawn("interrupt-worker", move || {
        worker_sink.line(format!("current thread: {}", current_thread_name()));
        let mut processed = 0u64;
        for _ in 0..limit {
            if worker_token.is_cancelled() {
                worker_sink.line(format!(
                    "{}: interrupted after {} iterations",
                    current_thread_name(),
                    processed
                ));
                return;
            }
            processed = black_box(processed + 1);
        }
        worker_sink.line(format!("completed all {limit} iterations"));
    });

    sink.line(format!("current thread: {}", current_thread_name()));
    token.cancel();
    worker.join();
}

inventory::submit! {
    ExperimentDef {
        id: "threads/interrupt",
        name: "interrupt",
        suite: Suite::Threads,
        order: 2,
        summary: "cancel a polling worker right after starting it",
        runner_fn: interrupt,
    }
}

/// The outer loop pauses at a fixed index to start a sleeping worker and
/// join it; nothing past that index is printed until the worker has
/// finished, even though the remaining iterations do not depend on it.
pub fn join(ctx: &mut ExperimentCtx) {
    let sink = ctx.sink.clone();
    let sleep_ms = ctx.params.join_sleep_ms;
    sink.line(format!("current thread: {}", current_thread_name()));

    for i in 0..ctx.params.join_outer_count {
        sink.line(format!("{i}"));

        if i == ctx.params.join_spawn_at {
            let worker_sink = sink.clone();
            let worker = Worker::spawn("join-worker", move || {
                worker_sink.line(format!("current thread: {}", current_thread_name()));
                thread::sleep(Duration::from_millis(sleep_ms));
                worker_sink.line("joined worker finished");
            });
            sink.line("waiting for the worker to finish...");
            worker.join();
        }
    }
}

inventory::submit! {
    ExperimentDef {
        id: "threads/join",
        name: "join",
        suite: Suite::Threads,
        order: 3,
        summary: "block a counting loop on a worker spawned mid-loop",
        runner_fn: join,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perflab_core::{ExperimentParams, Sink};

    fn reduced_ctx(sink: &Sink) -> ExperimentCtx {
        ExperimentCtx::new(sink.clone(), ExperimentParams::reduced())
    }

    fn counter_lines(snapshot: &[String]) -> Vec<u32> {
        snapshot.iter().filter_map(|l| l.parse().ok()).collect()
    }

    #[test]
    fn creation_joins_all_three_workers() {
        let sink = Sink::memory();
        creation(&mut reduced_ctx(&sink));

        let hellos = sink
            .snapshot()
            .iter()
            .filter(|l| l.starts_with("Hello from"))
            .count();
        assert_eq!(hellos, 3, "all three workers must finish before return");
    }

    #[test]
    fn sleep_counts_every_iteration_in_order() {
        let sink = Sink::memory();
        sleep(&mut reduced_ctx(&sink));

        assert_eq!(counter_lines(&sink.snapshot()), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn interrupt_always_terminates() {
        for _ in 0..100 {
            let sink = Sink::memory();
            interrupt(&mut reduced_ctx(&sink));

            let snapshot = sink.snapshot();
            assert!(
                snapshot
                    .iter()
                    .any(|l| l.contains("interrupted after") || l.contains("completed all")),
                "worker must report how it ended: {snapshot:?}"
            );
        }
    }

    #[test]
    fn interrupted_worker_reports_bounded_progress() {
        let sink = Sink::memory();
        let mut ctx = reduced_ctx(&sink);
        interrupt(&mut ctx);

        if let Some(line) = sink
            .snapshot()
            .iter()
            .find(|l| l.contains("interrupted after"))
        {
            let processed: u64 = line
                .split_whitespace()
                .find_map(|w| w.parse().ok())
                .expect("interruption notice carries an iteration count");
            assert!(processed <= ctx.params.interrupt_iterations);
        }
    }

    #[test]
    fn join_barrier_holds_the_outer_loop() {
        let sink = Sink::memory();
        join(&mut reduced_ctx(&sink));

        let snapshot = sink.snapshot();
        let position = |needle: &str| {
            snapshot
                .iter()
                .position(|l| l == needle)
                .unwrap_or_else(|| panic!("missing line {needle:?} in {snapshot:?}"))
        };

        assert!(position("5") < position("waiting for the worker to finish..."));
        assert!(
            position("joined worker finished") < position("6"),
            "index 6 must not print before the worker completes"
        );
        assert_eq!(counter_lines(&snapshot), (0..10).collect::<Vec<_>>());
    }
}
