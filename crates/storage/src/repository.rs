//! Measure Store Implementation

use crate::{DatabaseSettings, Measure, NewMeasure, StorageError};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL-backed store for noise readings.
///
/// Owns the only connection pool in the process. Constructed once by the
/// composition root and handed to whatever needs store access; nothing
/// reaches the pool except through this type. The pool is created lazily,
/// so first contact with the store happens under the startup readiness
/// probe rather than in the constructor.
pub struct MeasureStore {
    pub(crate) pool: PgPool,
}

impl MeasureStore {
    /// Create a store from settings without touching the network.
    pub fn new(settings: &DatabaseSettings) -> Result<Self, StorageError> {
        let options = PgConnectOptions::from_str(&settings.url)
            .map_err(|e| StorageError::Configuration(e.to_string()))?;

        let pool = PgPoolOptions::new()
            .min_connections(settings.pool.min_connections)
            .max_connections(settings.pool.max_connections)
            .acquire_timeout(Duration::from_secs(settings.pool.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(settings.pool.idle_timeout_secs))
            .connect_lazy_with(options);

        Ok(Self { pool })
    }

    /// Trivial round trip used as the reachability probe.
    pub async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1 + 1 AS result")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    /// Insert a reading, generating its uuid, and return the stored row.
    pub async fn insert(&self, new: NewMeasure) -> Result<Measure, StorageError> {
        let row = sqlx::query_as::<_, Measure>(
            r#"
            INSERT INTO measures
                (uuid, "sensorID", "decibelValue", "decibelTimerange", "timestamp", geohash, detected)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.sensor_id)
        .bind(new.decibel_value)
        .bind(new.decibel_timerange)
        .bind(&new.timestamp)
        .bind(&new.geohash)
        .bind(&new.detected)
        .fetch_one(&self.pool)
        .await?;

        debug!(sensor = %row.sensor_id, key = row.key, "inserted measure");
        Ok(row)
    }

    /// All stored readings, oldest first by `key`.
    pub async fn select_all(&self) -> Result<Vec<Measure>, StorageError> {
        let rows = sqlx::query_as::<_, Measure>("SELECT * FROM measures ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// The `limit` newest readings by `key`.
    pub async fn select_limited(&self, limit: i64) -> Result<Vec<Measure>, StorageError> {
        let rows =
            sqlx::query_as::<_, Measure>("SELECT * FROM measures ORDER BY key DESC LIMIT $1")
                .bind(limit)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    /// Delete every reading; returns the number of rows removed.
    pub async fn delete_all(&self) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM measures")
            .execute(&self.pool)
            .await?;
        debug!(deleted = result.rows_affected(), "cleared measures");
        Ok(result.rows_affected())
    }

    /// Distinct sensor identifiers currently present.
    pub async fn distinct_sensors(&self) -> Result<Vec<String>, StorageError> {
        let sensors =
            sqlx::query_scalar::<_, String>(r#"SELECT DISTINCT "sensorID" FROM measures"#)
                .fetch_all(&self.pool)
                .await?;
        Ok(sensors)
    }

    /// The newest reading for one sensor (maximum `key`), if any rows remain.
    pub async fn latest_for_sensor(&self, sensor_id: &str) -> Result<Option<Measure>, StorageError> {
        let row = sqlx::query_as::<_, Measure>(
            r#"SELECT * FROM measures WHERE "sensorID" = $1 ORDER BY key DESC LIMIT 1"#,
        )
        .bind(sensor_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
