//! Cross-tenant mismatch alerting
//!
//! When a tag enrolled under tenant A is scanned by tenant B's device, the
//! owning tenant is alerted through a configured webhook. Dispatch is
//! fire-and-forget: the scan response never waits on, or fails because of,
//! the alert sink.

use chrono::{DateTime, Utc};
use rollcall_common::{Error, Result};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Alert payload posted to the webhook
#[derive(Debug, Clone, Serialize)]
pub struct MismatchAlert {
    /// Tag uid that was scanned
    pub uid: String,
    /// Device that performed the scan
    pub device_uid: String,
    /// API key the device presented
    pub presented_api_key: String,
    /// Display name of the tenant that owns the tag
    pub owner_tenant: String,
    /// Name of the enrollment the tag points at
    pub person_name: String,
    pub timestamp: DateTime<Utc>,
}

/// Best-effort alert sink; a mail dispatcher can stand in behind the same
/// surface
#[derive(Clone)]
pub struct AlertNotifier {
    client: reqwest::Client,
    webhook: Option<String>,
}

impl AlertNotifier {
    /// Create a notifier; `webhook` of `None` disables dispatch entirely
    pub fn new(webhook: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| Error::Internal(format!("build alert http client: {e}")))?;

        Ok(Self { client, webhook })
    }

    pub fn is_enabled(&self) -> bool {
        self.webhook.is_some()
    }

    /// Queue an alert to the tenant that owns the scanned tag.
    ///
    /// Returns immediately; delivery happens on a spawned task and
    /// failures are logged and swallowed.
    pub fn mismatch_alert(&self, alert: MismatchAlert) {
        let Some(url) = self.webhook.clone() else {
            debug!(owner = %alert.owner_tenant, "alert webhook not configured, dropping mismatch alert");
            return;
        };

        let client = self.client.clone();
        tokio::spawn(async move {
            match client.post(&url).json(&alert).send().await {
                Ok(resp) if resp.status().is_success() => {
                    debug!(owner = %alert.owner_tenant, "mismatch alert delivered");
                }
                Ok(resp) => {
                    warn!(status = %resp.status(), "mismatch alert rejected by webhook");
                }
                Err(e) => {
                    warn!(error = %e, "mismatch alert dispatch failed");
                }
            }
        });
    }
}
