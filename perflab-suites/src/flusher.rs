//! Cache eviction helper.
//!
//! Touches a large scratch buffer (populate, then scan) to push earlier
//! data out of the processor caches before a timed section. The perturbation
//! is the whole point; the buffer is dropped on return.

use perflab_core::ExperimentCtx;
use std::hint::black_box;

/// Fill and scan a throwaway buffer, emitting progress markers along the
/// way. Markers are batched into a single sink line so concurrent workers
/// cannot shear the output.
pub fn flush(ctx: &mut ExperimentCtx) {
    let len = ctx.params.flush_len;
    let step = ctx.params.flush_progress_step.max(1);

    let mut line = String::from("--> filling cache with scratch data [");
    let checksum = fill_and_scan(len, step, |percent| {
        line.push_str(&format!("{percent}% "));
    });
    line.push_str("100%]");
    ctx.sink.line(line);

    // The scan must survive optimization or nothing gets evicted.
    black_box(checksum);
}

/// Populate a `len`-element buffer with its indices, then scan it once,
/// invoking `progress` at each multiple of `step`. Returns the scan
/// checksum.
fn fill_and_scan(len: usize, step: usize, mut progress: impl FnMut(usize)) -> u64 {
    let mut scratch = vec![0i32; len];
    for (i, slot) in scratch.iter_mut().enumerate() {
        *slot = i as i32;
    }

    let mut checksum = 0u64;
    for (i, value) in scratch.iter().enumerate() {
        checksum = checksum.wrapping_add(*value as u64);
        if i != 0 && i % step == 0 {
            progress(i * 100 / len);
        }
    }
    checksum
}
