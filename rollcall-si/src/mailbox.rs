//! Device mailbox
//!
//! Holds at most one pending scan result per device: a newer scan
//! overwrites the pending entry, a poll removes it. Entries live in the
//! store rather than process memory so every service instance sees the
//! same mailbox, and unread entries age out after a TTL.

use chrono::{DateTime, Duration, Utc};
use rollcall_common::api::ScanResult;
use rollcall_common::{Error, Result};
use sqlx::SqlitePool;

/// Per-device single-slot holding area for the latest scan outcome
#[derive(Clone)]
pub struct DeviceMailbox {
    db: SqlitePool,
    ttl_secs: u64,
}

impl DeviceMailbox {
    pub fn new(db: SqlitePool, ttl_secs: u64) -> Self {
        Self { db, ttl_secs }
    }

    /// Store `result` as the device's pending outcome, replacing any prior
    /// one (last write wins).
    pub async fn put(&self, device_uid: &str, result: &ScanResult) -> Result<()> {
        let payload = serde_json::to_string(result)
            .map_err(|e| Error::Internal(format!("serialize scan result: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO device_mailbox (device_uid, payload, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT(device_uid) DO UPDATE
            SET payload = excluded.payload, created_at = excluded.created_at
            "#,
        )
        .bind(device_uid)
        .bind(payload)
        .bind(Utc::now())
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Remove and return the device's pending outcome, if any.
    ///
    /// The delete-with-returning is a single statement, so two concurrent
    /// polls for the same device hand the result to exactly one of them.
    /// Entries older than the TTL are discarded instead of returned.
    pub async fn take(&self, device_uid: &str) -> Result<Option<ScanResult>> {
        let row: Option<(String, DateTime<Utc>)> = sqlx::query_as(
            "DELETE FROM device_mailbox WHERE device_uid = ? RETURNING payload, created_at",
        )
        .bind(device_uid)
        .fetch_optional(&self.db)
        .await?;

        let Some((payload, created_at)) = row else {
            return Ok(None);
        };

        if Utc::now().signed_duration_since(created_at) >= Duration::seconds(self.ttl_secs as i64) {
            return Ok(None);
        }

        let result = serde_json::from_str(&payload)
            .map_err(|e| Error::Internal(format!("deserialize scan result: {e}")))?;
        Ok(Some(result))
    }
}
