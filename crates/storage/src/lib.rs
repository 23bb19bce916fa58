//! Storage Layer
//!
//! Provides PostgreSQL persistence for noise readings: the `measures`
//! table, its connection pool, and idempotent schema creation.

mod measure;
mod repository;
mod schema;
mod settings;

pub use measure::{Measure, NewMeasure};
pub use repository::MeasureStore;
pub use settings::{DatabaseSettings, PoolSettings};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store could not be reached at all (I/O, TLS, closed pool).
    #[error("store unreachable: {0}")]
    Unreachable(String),
    /// No pooled connection became free within the acquire timeout.
    #[error("connection pool exhausted")]
    PoolExhausted,
    /// The store answered but the statement failed.
    #[error("query failed: {0}")]
    QueryFailed(String),
    /// The connection settings themselves are unusable.
    #[error("invalid database configuration: {0}")]
    Configuration(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => StorageError::PoolExhausted,
            sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                StorageError::Unreachable(err.to_string())
            }
            sqlx::Error::Configuration(cause) => StorageError::Configuration(cause.to_string()),
            other => StorageError::QueryFailed(other.to_string()),
        }
    }
}
