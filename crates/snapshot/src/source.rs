//! Reading Source Seam

use async_trait::async_trait;
use storage::{Measure, MeasureStore, StorageError};

/// What the aggregator needs from a store: sensor enumeration and a
/// per-sensor newest-reading lookup. The two calls carry no shared
/// isolation; callers of the aggregator get whatever the store's default
/// read level provides.
#[async_trait]
pub trait ReadingSource: Send + Sync {
    type Reading: Send + 'static;
    type Error: std::fmt::Display + Send + 'static;

    /// Distinct sensor identifiers currently present.
    async fn distinct_sensors(&self) -> Result<Vec<String>, Self::Error>;

    /// The reading with the highest `key` for one sensor, if any remain.
    async fn latest_for_sensor(
        &self,
        sensor_id: &str,
    ) -> Result<Option<Self::Reading>, Self::Error>;
}

#[async_trait]
impl ReadingSource for MeasureStore {
    type Reading = Measure;
    type Error = StorageError;

    async fn distinct_sensors(&self) -> Result<Vec<String>, StorageError> {
        MeasureStore::distinct_sensors(self).await
    }

    async fn latest_for_sensor(&self, sensor_id: &str) -> Result<Option<Measure>, StorageError> {
        MeasureStore::latest_for_sensor(self, sensor_id).await
    }
}
