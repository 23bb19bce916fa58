//! Schema Initialization
//!
//! Ensures the `measures` table exists before the service accepts
//! traffic. Creation is idempotent; an existing table is never altered.
//! Evolving the column set is a manual one-time script, not a startup
//! concern.

use crate::{MeasureStore, StorageError};
use tracing::{debug, info};

const CREATE_MEASURES: &str = r#"
CREATE TABLE IF NOT EXISTS measures (
    key                SERIAL PRIMARY KEY,
    uuid               UUID,
    "sensorID"         TEXT,
    "decibelValue"     DOUBLE PRECISION,
    "decibelTimerange" INTEGER,
    "timestamp"        TEXT,
    geohash            TEXT,
    detected           TEXT,
    created_at         TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at         TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

impl MeasureStore {
    /// Create the `measures` table if it does not exist.
    ///
    /// Returns whether a table was created, so repeated runs are
    /// observably no-ops. `IF NOT EXISTS` makes the check-then-act atomic
    /// at the store, so concurrent callers cannot race a duplicate
    /// creation.
    pub async fn ensure_schema(&self) -> Result<bool, StorageError> {
        let existing = sqlx::query_scalar::<_, Option<String>>(
            "SELECT to_regclass('public.measures')::text",
        )
        .fetch_one(&self.pool)
        .await?;

        if existing.is_some() {
            debug!("measures table already exists");
            return Ok(false);
        }

        sqlx::query(CREATE_MEASURES).execute(&self.pool).await?;
        info!("created measures table");
        Ok(true)
    }
}
