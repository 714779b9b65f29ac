//! Database initialization
//!
//! Creates the SQLite database on first run and brings the schema up
//! idempotently (every statement is `CREATE ... IF NOT EXISTS`).

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection pool and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(20)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers while one scan writes
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    // Wait out short writer contention instead of failing the scan
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables and indexes (idempotent - safe to call multiple times).
///
/// Public so tests can apply the schema to an in-memory pool.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_tenants_table(pool).await?;
    create_persons_table(pool).await?;
    create_time_settings_table(pool).await?;
    create_attendance_table(pool).await?;
    create_device_mailbox_table(pool).await?;
    Ok(())
}

async fn create_tenants_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tenants (
            api_key TEXT PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_persons_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS persons (
            guid TEXT PRIMARY KEY,
            uid TEXT NOT NULL,
            name TEXT NOT NULL,
            form TEXT NOT NULL DEFAULT '',
            api_key TEXT NOT NULL REFERENCES tenants(api_key),
            UNIQUE(uid, api_key)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_persons_uid ON persons(uid)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_time_settings_table(pool: &SqlitePool) -> Result<()> {
    // Window boundaries are HH:MM:SS text; late_grace_minutes and
    // early_leave_before are per-tenant punctuality policy.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS time_settings (
            api_key TEXT PRIMARY KEY REFERENCES tenants(api_key),
            sign_in_start TEXT NOT NULL,
            sign_in_end TEXT NOT NULL,
            sign_out_start TEXT NOT NULL,
            sign_out_end TEXT NOT NULL,
            late_grace_minutes INTEGER NOT NULL DEFAULT 0,
            early_leave_before TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_attendance_table(pool: &SqlitePool) -> Result<()> {
    // UNIQUE(person_guid, date) is what makes ledger bootstrap and the
    // transition updates race-safe; do not remove it.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id INTEGER PRIMARY KEY,
            person_guid TEXT NOT NULL REFERENCES persons(guid),
            api_key TEXT NOT NULL,
            date TEXT NOT NULL,
            signed_in INTEGER NOT NULL DEFAULT 0,
            signed_out INTEGER NOT NULL DEFAULT 0,
            sign_in_time TEXT,
            sign_out_time TEXT,
            punctuality TEXT,
            status TEXT NOT NULL DEFAULT 'absent',
            UNIQUE(person_guid, date)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_attendance_tenant_date ON attendance(api_key, date)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_device_mailbox_table(pool: &SqlitePool) -> Result<()> {
    // One pending scan result per device; newer scans overwrite.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS device_mailbox (
            device_uid TEXT PRIMARY KEY,
            payload TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
