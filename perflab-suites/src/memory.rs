//! Cache behavior experiments.
//!
//! Three demonstrations, run in registration order: repeated access to a
//! single scalar, concurrent summation under a contending writer, and
//! row-major vs column-major matrix traversal. Interval timings are
//! milliseconds; the scalar-access deltas are nanoseconds.

use crate::flusher;
use perflab_core::{
    ExperimentCtx, ExperimentDef, Instant, Stopwatch, Suite, Worker, HAS_CYCLE_COUNTER,
};
use std::hint::black_box;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

/// Times two consecutive read-and-print accesses to one scalar and records
/// the deltas as the cold and warm cost.
///
/// Illustrative, not a certified benchmark: nothing guarantees the first
/// access is actually colder than the second, and the print dominates both
/// readings. The only hard property is that both deltas get captured.
pub fn repeated_access(ctx: &mut ExperimentCtx) {
    let x = black_box(100i32);

    let start = Instant::now();
    ctx.sink.line(format!("x: {}", black_box(x)));
    let cold = start.elapsed_nanos();
    let cold_cycles = Instant::now().cycles().saturating_sub(start.cycles());
    ctx.sink.line(format!("access with cold cache: {cold} ns"));

    let start = Instant::now();
    ctx.sink.line(format!("x: {}", black_box(x)));
    let warm = start.elapsed_nanos();
    let warm_cycles = Instant::now().cycles().saturating_sub(start.cycles());
    ctx.sink.line(format!("access with warm cache: {warm} ns"));

    if HAS_CYCLE_COUNTER {
        ctx.sink.line(format!(
            "raw ticks: {cold_cycles} cold, {warm_cycles} warm"
        ));
    }

    ctx.record_nanos("cold access", cold);
    ctx.record_nanos("warm access", warm);
}

inventory::submit! {
    ExperimentDef {
        id: "memory/repeated_access",
        name: "repeated access",
        suite: Suite::Memory,
        order: 0,
        summary: "time two back-to-back reads of one scalar",
        runner_fn: repeated_access,
    }
}

/// Sums a large buffer while a second worker concurrently rewrites every
/// `writer_stride`-th element, then repeats the sum alone after a cache
/// flush.
///
/// The two workers cover the FULL index range of the same buffer using
/// Relaxed atomic loads and stores with no further synchronization. That is
/// intentional: the writer keeps invalidating cache lines under the reader,
/// and that coherence traffic is what the first timing captures. No
/// correctness property depends on the writer's output, which is the only
/// reason the race is tolerable.
pub fn false_sharing(ctx: &mut ExperimentCtx) {
    let len = ctx.params.shared_len;
    let stride = ctx.params.writer_stride.max(1);
    let sink = ctx.sink.clone();

    let buffer: Arc<Vec<AtomicI32>> =
        Arc::new((0..len).map(|i| AtomicI32::new(i as i32)).collect());

    let reader_buffer = Arc::clone(&buffer);
    let reader_sink = sink.clone();
    let writer_buffer = Arc::clone(&buffer);

    let contended = Stopwatch::start();
    let reader = Worker::spawn("contended-reader", move || {
        let sum = sum_buffer(&reader_buffer);
        reader_sink.line(format!("sum: {sum}"));
    });
    let writer = Worker::spawn("contended-writer", move || {
        for i in (0..writer_buffer.len()).step_by(stride) {
            let value = writer_buffer[i].load(Ordering::Relaxed);
            writer_buffer[i].store(value / 10, Ordering::Relaxed);
        }
    });
    reader.join();
    let contended_ms = contended.elapsed_millis();
    sink.line(format!(
        "summation with contending writer: {contended_ms} ms"
    ));
    ctx.record_millis("contended sum", contended_ms);

    flusher::flush(ctx);

    let solo_buffer = Arc::clone(&buffer);
    let solo_sink = sink.clone();
    let uncontended = Stopwatch::start();
    let solo = Worker::spawn("solo-reader", move || {
        let sum = sum_buffer(&solo_buffer);
        solo_sink.line(format!("sum: {sum}"));
    });
    solo.join();
    let uncontended_ms = uncontended.elapsed_millis();

    // The writer may still be live at this point; it is joined only here.
    // Removing this late join would leak a running, still-mutating thread
    // past the experiment.
    writer.join();

    sink.line(format!(
        "summation without contending writer: {uncontended_ms} ms"
    ));
    ctx.record_millis("uncontended sum", uncontended_ms);
}

/// Sum every element with Relaxed loads. Deterministic only when nothing
/// writes concurrently.
fn sum_buffer(buffer: &[AtomicI32]) -> i64 {
    let mut sum = 0i64;
    for cell in buffer {
        sum += i64::from(cell.load(Ordering::Relaxed));
    }
    black_box(sum)
}

inventory::submit! {
    ExperimentDef {
        id: "memory/false_sharing",
        name: "false sharing",
        suite: Suite::Memory,
        order: 1,
        summary: "sum a shared buffer with and without a contending writer",
        runner_fn: false_sharing,
    }
}

/// Row-major vs column-major traversal of the same matrix, with a cache
/// flush before each timed pass.
///
/// Both passes visit every element exactly once, so the two sums must be
/// identical; only the access order, and therefore the timing, differs.
pub fn locality(ctx: &mut ExperimentCtx) {
    let n = ctx.params.matrix_dim;
    let mut matrix = vec![0i64; n * n];
    for i in 0..n {
        for j in 0..n {
            matrix[i * n + j] = (i + j) as i64;
        }
    }

    flusher::flush(ctx);

    let pass = Stopwatch::start();
    let column_sum = sum_column_major(&matrix, n);
    let column_ms = pass.elapsed_millis();
    ctx.sink.line(format!(
        "[column-major] sum: {column_sum}, calculated in {column_ms} ms"
    ));
    ctx.record_millis("column-major pass", column_ms);

    flusher::flush(ctx);

    let pass = Stopwatch::start();
    let row_sum = sum_row_major(&matrix, n);
    let row_ms = pass.elapsed_millis();
    ctx.sink.line(format!(
        "[row-major] sum: {row_sum}, calculated in {row_ms} ms"
    ));
    ctx.record_millis("row-major pass", row_ms);
}

/// Traversal matching the matrix's row-major layout.
fn sum_row_major(matrix: &[i64], n: usize) -> i64 {
    let mut sum = 0i64;
    for i in 0..n {
        for j in 0..n {
            sum += matrix[i * n + j];
        }
    }
    black_box(sum)
}

/// Traversal striding a full row length between consecutive reads.
fn sum_column_major(matrix: &[i64], n: usize) -> i64 {
    let mut sum = 0i64;
    for i in 0..n {
        for j in 0..n {
            sum += matrix[j * n + i];
        }
    }
    black_box(sum)
}

inventory::submit! {
    ExperimentDef {
        id: "memory/locality",
        name: "locality",
        suite: Suite::Memory,
        order: 2,
        summary: "sum a matrix in column-major then row-major order",
        runner_fn: locality,
    }
}
