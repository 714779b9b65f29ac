//! Database lookups for scan processing
//!
//! Attendance mutations live with the components that own them
//! ([`crate::scan::ledger`], [`crate::scan::machine`], [`crate::mailbox`]);
//! this module holds the shared read-side queries.

use rollcall_common::db::models::{Person, TimeSettingsRow};
use rollcall_common::Result;
use sqlx::SqlitePool;

/// Look up a person by tag uid alone, across all tenants
pub async fn person_by_uid(pool: &SqlitePool, uid: &str) -> Result<Option<Person>> {
    let person = sqlx::query_as::<_, Person>(
        "SELECT guid, uid, name, form, api_key FROM persons WHERE uid = ? LIMIT 1",
    )
    .bind(uid)
    .fetch_optional(pool)
    .await?;

    Ok(person)
}

/// Look up a person by tag uid within one tenant's enrollment
pub async fn person_by_uid_and_key(
    pool: &SqlitePool,
    uid: &str,
    api_key: &str,
) -> Result<Option<Person>> {
    let person = sqlx::query_as::<_, Person>(
        "SELECT guid, uid, name, form, api_key FROM persons WHERE uid = ? AND api_key = ? LIMIT 1",
    )
    .bind(uid)
    .bind(api_key)
    .fetch_optional(pool)
    .await?;

    Ok(person)
}

/// Display name of the tenant owning `api_key`
pub async fn tenant_name(pool: &SqlitePool, api_key: &str) -> Result<Option<String>> {
    let name: Option<(String,)> =
        sqlx::query_as("SELECT name FROM tenants WHERE api_key = ? LIMIT 1")
            .bind(api_key)
            .fetch_optional(pool)
            .await?;

    Ok(name.map(|(n,)| n))
}

/// Scan-window configuration for a tenant
pub async fn time_settings(pool: &SqlitePool, api_key: &str) -> Result<Option<TimeSettingsRow>> {
    let row = sqlx::query_as::<_, TimeSettingsRow>(
        r#"
        SELECT api_key, sign_in_start, sign_in_end, sign_out_start, sign_out_end,
               late_grace_minutes, early_leave_before
        FROM time_settings WHERE api_key = ? LIMIT 1
        "#,
    )
    .bind(api_key)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
