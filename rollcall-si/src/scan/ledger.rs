//! Daily attendance ledger bootstrap
//!
//! The first scan of a day materializes one `absent` row per enrolled
//! person of the scanning tenant. Insertion is conflict-tolerant on
//! (person, date), so concurrent first scans cannot double-initialize and
//! re-invocation is a no-op.

use rollcall_common::db::models::{AttendanceStatus, Person};
use rollcall_common::Result;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::info;

/// Ensure attendance rows exist for `person`'s tenant on `date`.
///
/// The bulk insert is skipped once any row exists for (tenant, date); the
/// scanning person's own row is upserted unconditionally to cover
/// enrollment that happened after the day was initialized.
pub async fn ensure_day(pool: &SqlitePool, person: &Person, date: NaiveDate) -> Result<()> {
    let initialized: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM attendance WHERE api_key = ? AND date = ?)",
    )
    .bind(&person.api_key)
    .bind(date)
    .fetch_one(pool)
    .await?;

    if !initialized {
        let inserted = sqlx::query(
            r#"
            INSERT INTO attendance (person_guid, api_key, date, signed_in, signed_out, status)
            SELECT guid, api_key, ?, 0, 0, ? FROM persons WHERE api_key = ?
            ON CONFLICT(person_guid, date) DO NOTHING
            "#,
        )
        .bind(date)
        .bind(AttendanceStatus::Absent.as_str())
        .bind(&person.api_key)
        .execute(pool)
        .await?;

        if inserted.rows_affected() > 0 {
            info!(%date, rows = inserted.rows_affected(), "attendance ledger initialized");
        }
    }

    sqlx::query(
        r#"
        INSERT INTO attendance (person_guid, api_key, date, signed_in, signed_out, status)
        VALUES (?, ?, ?, 0, 0, ?)
        ON CONFLICT(person_guid, date) DO NOTHING
        "#,
    )
    .bind(&person.guid)
    .bind(&person.api_key)
    .bind(date)
    .bind(AttendanceStatus::Absent.as_str())
    .execute(pool)
    .await?;

    Ok(())
}
