//! Perflab Suites
//!
//! The experiments themselves: the thread lifecycle suite ([`threads`]),
//! the cache behavior suite ([`memory`]), and the cache-flush helper
//! ([`flusher`]) the memory suite uses between timed sections.
//!
//! Each experiment registers itself at link time; link this crate into any
//! binary that should discover them. The functions are also callable
//! directly with an [`perflab_core::ExperimentCtx`], which is how the tests
//! drive them against a memory sink.

pub mod flusher;
pub mod memory;
pub mod threads;
