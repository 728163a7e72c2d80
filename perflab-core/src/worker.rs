//! Named worker threads.
//!
//! Every [`Worker`] is an OS thread paired with its join handle; every spawn
//! in the experiments is paired with an eventual [`Worker::join`]. A worker
//! that panics is reported at join time and swallowed: the experiment's
//! remaining output reflects the curtailed run, the caller keeps going.

use std::thread::{self, JoinHandle};

/// A pre-packaged, zero-argument unit of work.
///
/// One of the three launch styles the creation experiment demonstrates;
/// closures and fn items go through [`Worker::spawn`] directly.
pub trait Runnable: Send {
    /// Consume the unit and perform its work.
    fn run(self: Box<Self>);
}

/// An OS thread paired with its join handle.
pub struct Worker {
    name: String,
    handle: JoinHandle<()>,
}

impl Worker {
    /// Spawn a named worker running `f`.
    ///
    /// Panics if the OS refuses to spawn a thread, matching
    /// `std::thread::spawn`.
    pub fn spawn<F>(name: &str, f: F) -> Worker
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(f)
            .expect("failed to spawn worker thread");
        Worker {
            name: name.to_string(),
            handle,
        }
    }

    /// Spawn a worker from a boxed [`Runnable`].
    pub fn spawn_runnable(name: &str, unit: Box<dyn Runnable>) -> Worker {
        Self::spawn(name, move || unit.run())
    }

    /// The worker's thread name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Block until the worker terminates, however long that takes.
    ///
    /// A panicking worker is logged and swallowed rather than re-raised.
    pub fn join(self) {
        if self.handle.join().is_err() {
            tracing::warn!(worker = %self.name, "worker panicked before completing");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn spawned_closure_runs_to_completion() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);

        let worker = Worker::spawn("closure", move || flag.store(true, Ordering::SeqCst));
        assert_eq!(worker.name(), "closure");
        worker.join();

        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn runnable_object_runs_to_completion() {
        struct Unit(Arc<AtomicBool>);
        impl Runnable for Unit {
            fn run(self: Box<Self>) {
                self.0.store(true, Ordering::SeqCst);
            }
        }

        let ran = Arc::new(AtomicBool::new(false));
        let worker = Worker::spawn_runnable("runnable", Box::new(Unit(Arc::clone(&ran))));
        worker.join();

        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn join_swallows_worker_panic() {
        let worker = Worker::spawn("doomed", || panic!("intentional test panic"));
        // Must return normally rather than propagating the panic.
        worker.join();
    }

    #[test]
    fn workers_carry_their_thread_name() {
        let worker = Worker::spawn("identity", || {
            assert_eq!(thread::current().name(), Some("identity"));
        });
        worker.join();
    }
}
