//! Serialized line output.
//!
//! Experiments run several workers that emit trace lines concurrently. The
//! sink serializes only the write of each line, so lines never shear into
//! each other; it adds no ordering between workers beyond that.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
enum Kind {
    Stdout,
    Memory(Arc<Mutex<Vec<String>>>),
}

/// Cloneable line-oriented output handle.
///
/// Clones share the same destination: the stdout sink writes through the
/// process-wide stdout lock, the memory sink appends to shared storage that
/// tests inspect with [`Sink::snapshot`].
#[derive(Clone)]
pub struct Sink {
    kind: Kind,
}

impl Sink {
    /// Sink writing to standard output.
    pub fn stdout() -> Self {
        Sink { kind: Kind::Stdout }
    }

    /// Sink capturing lines in memory, for tests.
    pub fn memory() -> Self {
        Sink {
            kind: Kind::Memory(Arc::new(Mutex::new(Vec::new()))),
        }
    }

    /// Write one line.
    pub fn line(&self, text: impl Into<String>) {
        let text = text.into();
        match &self.kind {
            Kind::Stdout => {
                let mut out = std::io::stdout().lock();
                let _ = writeln!(out, "{text}");
            }
            Kind::Memory(lines) => {
                // A worker that panicked elsewhere must not wedge every
                // later line behind a poisoned mutex.
                lines
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(text);
            }
        }
    }

    /// Lines captured so far. Empty for the stdout sink.
    pub fn snapshot(&self) -> Vec<String> {
        match &self.kind {
            Kind::Stdout => Vec::new(),
            Kind::Memory(lines) => lines
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }
}

impl Default for Sink {
    fn default() -> Self {
        Self::stdout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_preserves_push_order() {
        let sink = Sink::memory();
        sink.line("first");
        sink.line("second");
        assert_eq!(sink.snapshot(), vec!["first", "second"]);
    }

    #[test]
    fn clones_share_storage() {
        let sink = Sink::memory();
        let clone = sink.clone();
        clone.line("via clone");
        assert_eq!(sink.snapshot(), vec!["via clone"]);
    }

    #[test]
    fn concurrent_writers_lose_no_lines() {
        let sink = Sink::memory();
        let mut handles = Vec::new();
        for worker in 0..8 {
            let sink = sink.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..100 {
                    sink.line(format!("worker {worker} line {i}"));
                }
            }));
        }
        for handle in handles {
            handle.join().expect("writer thread panicked");
        }
        assert_eq!(sink.snapshot().len(), 800);
    }

    #[test]
    fn stdout_sink_snapshot_is_empty() {
        let sink = Sink::stdout();
        sink.line("goes to the console");
        assert!(sink.snapshot().is_empty());
    }
}
