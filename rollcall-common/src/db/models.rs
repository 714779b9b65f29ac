//! Database models

use crate::window::{parse_time_of_day, TenantSchedule, TimeWindow};
use crate::Result;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An enrolled member of a tenant, addressed by their RFID tag uid.
///
/// `uid` is unique per tenant but may be reused by other tenants.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Person {
    pub guid: String,
    pub uid: String,
    pub name: String,
    /// Grouping label (class/form) shown in attendance listings
    pub form: String,
    /// API key of the owning tenant
    pub api_key: String,
}

/// A tenant organization, keyed by its API key
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tenant {
    pub api_key: String,
    pub name: String,
}

/// Per-tenant scan windows as stored, times as `HH:MM:SS` text
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TimeSettingsRow {
    pub api_key: String,
    pub sign_in_start: String,
    pub sign_in_end: String,
    pub sign_out_start: String,
    pub sign_out_end: String,
    pub late_grace_minutes: i64,
    pub early_leave_before: Option<String>,
}

impl TimeSettingsRow {
    /// Parse the stored strings into an evaluatable schedule
    pub fn to_schedule(&self) -> Result<TenantSchedule> {
        let early_leave_before = match &self.early_leave_before {
            Some(s) => Some(parse_time_of_day(s)?),
            None => None,
        };
        Ok(TenantSchedule {
            sign_in: TimeWindow::new(
                parse_time_of_day(&self.sign_in_start)?,
                parse_time_of_day(&self.sign_in_end)?,
            ),
            sign_out: TimeWindow::new(
                parse_time_of_day(&self.sign_out_start)?,
                parse_time_of_day(&self.sign_out_end)?,
            ),
            late_grace: Duration::minutes(self.late_grace_minutes),
            early_leave_before,
        })
    }
}

/// Daily attendance status, derived from the two transition flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceStatus {
    Absent,
    Partial,
    Present,
}

impl AttendanceStatus {
    /// Stable string form stored in attendance rows
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Partial => "partial",
            AttendanceStatus::Present => "present",
        }
    }

    /// Status implied by the transition flags: present iff both are set,
    /// partial iff only signed-in is set
    pub fn derive(signed_in: bool, signed_out: bool) -> Self {
        match (signed_in, signed_out) {
            (true, true) => AttendanceStatus::Present,
            (true, false) => AttendanceStatus::Partial,
            _ => AttendanceStatus::Absent,
        }
    }
}

/// One person's attendance state for one calendar date
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub id: i64,
    pub person_guid: String,
    pub api_key: String,
    pub date: NaiveDate,
    pub signed_in: bool,
    pub signed_out: bool,
    pub sign_in_time: Option<DateTime<Utc>>,
    pub sign_out_time: Option<DateTime<Utc>>,
    pub punctuality: Option<String>,
    pub status: String,
}
