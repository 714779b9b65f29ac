//! rollcall-si library - Scan Intake service
//!
//! Converts raw RFID tag scans into per-person, per-day attendance records
//! and holds the latest outcome per device for asynchronous polling.

use axum::Router;
use sqlx::SqlitePool;

use crate::mailbox::DeviceMailbox;
use crate::notify::AlertNotifier;

pub mod api;
pub mod db;
pub mod mailbox;
pub mod notify;
pub mod scan;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Per-device pending scan results
    pub mailbox: DeviceMailbox,
    /// Cross-tenant mismatch alert sink
    pub notifier: AlertNotifier,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, mailbox: DeviceMailbox, notifier: AlertNotifier) -> Self {
        Self { db, mailbox, notifier }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};
    use tower_http::cors::CorsLayer;
    use tower_http::trace::TraceLayer;

    Router::new()
        .route("/scan", post(api::post_scan))
        .route("/scan/queue", get(api::get_scan_queue))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
