//! Measure Records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored noise reading, one row of `measures`.
///
/// `key` is assigned by the store and strictly increases in insertion
/// order; it is the only reliable recency ordering. The `timestamp`
/// column is an opaque client-supplied string and must not be trusted
/// for ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Measure {
    pub key: i32,
    pub uuid: Uuid,
    #[serde(rename = "sensorID")]
    #[sqlx(rename = "sensorID")]
    pub sensor_id: String,
    #[serde(rename = "decibelValue")]
    #[sqlx(rename = "decibelValue")]
    pub decibel_value: f64,
    #[serde(rename = "decibelTimerange")]
    #[sqlx(rename = "decibelTimerange")]
    pub decibel_timerange: i32,
    pub timestamp: String,
    pub geohash: String,
    pub detected: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A new reading as submitted by a sensor client.
///
/// The shape is closed: unknown fields are rejected instead of being
/// merged into the row, and the row `uuid` is generated server-side at
/// insert time, never accepted from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewMeasure {
    #[serde(rename = "sensorID")]
    pub sensor_id: String,
    #[serde(rename = "decibelValue")]
    pub decibel_value: f64,
    #[serde(rename = "decibelTimerange")]
    pub decibel_timerange: i32,
    pub timestamp: String,
    pub geohash: String,
    pub detected: String,
}
