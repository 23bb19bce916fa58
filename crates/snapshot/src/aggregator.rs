//! Fan-Out/Fan-In Aggregator

use crate::{ReadingSource, SnapshotError};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::debug;

/// Compute the latest reading per distinct sensor.
///
/// Fans out one concurrent per-sensor query and joins until every one of
/// them has reported, so each invocation produces exactly one outcome:
/// the complete snapshot, or the first failure with the remaining
/// workers aborted. No ordering is promised across sensors in the
/// result; within the store, recency is ordered by `key` alone.
///
/// Sensor enumeration and the per-sensor lookups are separate reads with
/// no shared isolation. A sensor inserted in between may or may not
/// appear in the snapshot, and one whose rows were deleted in between is
/// skipped; both are accepted races.
pub async fn snapshot<S>(source: Arc<S>) -> Result<Vec<S::Reading>, SnapshotError>
where
    S: ReadingSource + 'static,
{
    let sensors = source
        .distinct_sensors()
        .await
        .map_err(|e| SnapshotError::Sensors(e.to_string()))?;

    if sensors.is_empty() {
        return Ok(Vec::new());
    }

    let expected = sensors.len();
    let mut workers = JoinSet::new();
    for sensor in sensors {
        let source = Arc::clone(&source);
        workers.spawn(async move {
            let outcome = source.latest_for_sensor(&sensor).await;
            (sensor, outcome)
        });
    }

    // Drain the whole set before answering. Completion order is
    // irrelevant; the response is produced once, after the last worker,
    // regardless of how the lookups interleave.
    let mut readings = Vec::with_capacity(expected);
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok((_, Ok(Some(reading)))) => readings.push(reading),
            Ok((sensor, Ok(None))) => {
                debug!(sensor = %sensor, "sensor rows vanished during snapshot");
            }
            Ok((sensor, Err(cause))) => {
                workers.abort_all();
                return Err(SnapshotError::Sensor {
                    sensor,
                    cause: cause.to_string(),
                });
            }
            Err(join_err) => {
                workers.abort_all();
                return Err(SnapshotError::Join(join_err.to_string()));
            }
        }
    }

    debug!(sensors = expected, readings = readings.len(), "snapshot complete");
    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row {
        sensor: &'static str,
        key: i32,
    }

    #[derive(Default)]
    struct MemorySource {
        rows: Vec<Row>,
        fail_enumeration: bool,
        fail_sensor: Option<&'static str>,
        /// Sensor listed during enumeration whose rows are already gone.
        vanished_sensor: Option<&'static str>,
        /// Per-sensor lookup delays, to force out-of-order completion.
        delays: Vec<(&'static str, u64)>,
    }

    #[async_trait]
    impl ReadingSource for MemorySource {
        type Reading = Row;
        type Error = String;

        async fn distinct_sensors(&self) -> Result<Vec<String>, String> {
            if self.fail_enumeration {
                return Err("relation \"measures\" does not exist".to_string());
            }
            let mut sensors: Vec<String> = Vec::new();
            for row in &self.rows {
                if !sensors.iter().any(|s| s == row.sensor) {
                    sensors.push(row.sensor.to_string());
                }
            }
            if let Some(ghost) = self.vanished_sensor {
                sensors.push(ghost.to_string());
            }
            Ok(sensors)
        }

        async fn latest_for_sensor(&self, sensor_id: &str) -> Result<Option<Row>, String> {
            if let Some((_, secs)) = self.delays.iter().find(|(s, _)| *s == sensor_id) {
                tokio::time::sleep(Duration::from_secs(*secs)).await;
            }
            if self.fail_sensor == Some(sensor_id) {
                return Err("connection reset by peer".to_string());
            }
            Ok(self
                .rows
                .iter()
                .filter(|r| r.sensor == sensor_id)
                .max_by_key(|r| r.key)
                .cloned())
        }
    }

    fn sorted(mut readings: Vec<Row>) -> Vec<Row> {
        readings.sort_by_key(|r| r.sensor);
        readings
    }

    #[tokio::test]
    async fn empty_store_yields_an_empty_snapshot() {
        let source = Arc::new(MemorySource::default());
        let readings = snapshot(source).await.unwrap();
        assert!(readings.is_empty());
    }

    #[tokio::test]
    async fn one_latest_reading_per_sensor() {
        let source = Arc::new(MemorySource {
            rows: vec![
                Row { sensor: "a", key: 1 },
                Row { sensor: "a", key: 3 },
                Row { sensor: "b", key: 2 },
            ],
            ..Default::default()
        });

        let readings = sorted(snapshot(source).await.unwrap());
        assert_eq!(
            readings,
            vec![Row { sensor: "a", key: 3 }, Row { sensor: "b", key: 2 }]
        );
    }

    #[tokio::test]
    async fn newer_reading_changes_only_its_own_sensor() {
        let mut rows = vec![
            Row { sensor: "a", key: 1 },
            Row { sensor: "a", key: 3 },
            Row { sensor: "b", key: 2 },
        ];
        let before = sorted(
            snapshot(Arc::new(MemorySource {
                rows: rows.clone(),
                ..Default::default()
            }))
            .await
            .unwrap(),
        );

        rows.push(Row { sensor: "a", key: 5 });
        let after = sorted(
            snapshot(Arc::new(MemorySource {
                rows,
                ..Default::default()
            }))
            .await
            .unwrap(),
        );

        assert_eq!(before[0], Row { sensor: "a", key: 3 });
        assert_eq!(after[0], Row { sensor: "a", key: 5 });
        assert_eq!(before[1], after[1]);
    }

    #[tokio::test]
    async fn a_single_sensor_with_one_reading_is_a_valid_snapshot() {
        let source = Arc::new(MemorySource {
            rows: vec![Row { sensor: "a", key: 1 }],
            ..Default::default()
        });
        let readings = snapshot(source).await.unwrap();
        assert_eq!(readings, vec![Row { sensor: "a", key: 1 }]);
    }

    #[tokio::test]
    async fn one_failing_subquery_fails_the_whole_snapshot() {
        let source = Arc::new(MemorySource {
            rows: vec![
                Row { sensor: "a", key: 1 },
                Row { sensor: "b", key: 2 },
                Row { sensor: "c", key: 3 },
            ],
            fail_sensor: Some("b"),
            ..Default::default()
        });

        let err = snapshot(source).await.unwrap_err();
        match err {
            SnapshotError::Sensor { sensor, .. } => assert_eq!(sensor, "b"),
            other => panic!("expected a per-sensor failure, got {other}"),
        }
    }

    #[tokio::test]
    async fn enumeration_failure_fans_nothing_out() {
        let source = Arc::new(MemorySource {
            fail_enumeration: true,
            ..Default::default()
        });
        let err = snapshot(source).await.unwrap_err();
        assert!(matches!(err, SnapshotError::Sensors(_)));
    }

    #[tokio::test]
    async fn a_sensor_that_vanished_mid_snapshot_is_skipped() {
        let source = Arc::new(MemorySource {
            rows: vec![Row { sensor: "a", key: 1 }],
            vanished_sensor: Some("ghost"),
            ..Default::default()
        });
        let readings = snapshot(source).await.unwrap();
        assert_eq!(readings, vec![Row { sensor: "a", key: 1 }]);
    }

    #[tokio::test(start_paused = true)]
    async fn out_of_order_completion_still_produces_one_complete_snapshot() {
        let source = Arc::new(MemorySource {
            rows: vec![
                Row { sensor: "a", key: 1 },
                Row { sensor: "b", key: 2 },
                Row { sensor: "c", key: 3 },
            ],
            // "a" finishes last even though it was fanned out first
            delays: vec![("a", 3), ("b", 1), ("c", 2)],
            ..Default::default()
        });

        let readings = sorted(snapshot(source).await.unwrap());
        assert_eq!(
            readings,
            vec![
                Row { sensor: "a", key: 1 },
                Row { sensor: "b", key: 2 },
                Row { sensor: "c", key: 3 },
            ]
        );
    }
}
