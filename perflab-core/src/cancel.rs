//! Cooperative cancellation.
//!
//! Workers are never killed from outside; they observe a [`CancelToken`]
//! at their own poll points, or get woken out of an interruptible sleep.
//! Requesting cancellation therefore guarantees nothing about how promptly
//! a worker terminates, only that its next observation sees the flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;

/// Error returned when an interruptible sleep is cut short by cancellation.
#[derive(Debug, Error)]
#[error("sleep interrupted after {slept_ms} ms")]
pub struct Interrupted {
    /// Milliseconds actually slept before the token fired.
    pub slept_ms: u64,
}

struct Inner {
    cancelled: AtomicBool,
    lock: Mutex<()>,
    wakeup: Condvar,
}

/// Cloneable cancellation handle shared between a spawner and its worker.
#[derive(Clone)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

impl CancelToken {
    /// Create a fresh, uncancelled token.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                lock: Mutex::new(()),
                wakeup: Condvar::new(),
            }),
        }
    }

    /// Request cancellation and wake any sleeper on this token.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Relaxed);
        let _guard = self
            .inner
            .lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.inner.wakeup.notify_all();
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Relaxed)
    }

    /// Sleep for `duration`, returning early with [`Interrupted`] if the
    /// token is cancelled before the time is up.
    pub fn sleep(&self, duration: Duration) -> Result<(), Interrupted> {
        let started = std::time::Instant::now();
        let mut guard = self
            .inner
            .lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        loop {
            if self.is_cancelled() {
                return Err(Interrupted {
                    slept_ms: started.elapsed().as_millis() as u64,
                });
            }

            let elapsed = started.elapsed();
            if elapsed >= duration {
                return Ok(());
            }

            let (next, _timeout) = self
                .inner
                .wakeup
                .wait_timeout(guard, duration - elapsed)
                .unwrap_or_else(PoisonError::into_inner);
            guard = next;
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
