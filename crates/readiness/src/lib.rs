//! Startup Readiness Supervision
//!
//! Gates service initialization behind a retrying connectivity probe, so
//! a process started before its store (a common orchestration race)
//! waits instead of crashing.

mod supervisor;

pub use supervisor::ensure_ready;
