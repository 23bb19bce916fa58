//! Latest-Reading Snapshot Aggregation
//!
//! Computes the newest reading per distinct sensor by fanning out one
//! query per sensor and joining every outcome before answering.

mod aggregator;
mod source;

pub use aggregator::snapshot;
pub use source::ReadingSource;

use thiserror::Error;

/// Snapshot failures. Every invocation produces exactly one outcome, so a
/// failing sub-query surfaces as one of these, never as a partial result.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Enumerating the distinct sensors failed; nothing was fanned out.
    #[error("sensor enumeration failed: {0}")]
    Sensors(String),
    /// One per-sensor query failed; the whole snapshot is discarded.
    #[error("latest-reading query for sensor \"{sensor}\" failed: {cause}")]
    Sensor { sensor: String, cause: String },
    /// A fan-out worker died before reporting an outcome.
    #[error("snapshot worker failed: {0}")]
    Join(String),
}
