//! Timestamp utilities

use chrono::{DateTime, Local, NaiveDateTime, Utc};

/// A single wall-clock capture for one scan request.
///
/// Attendance windows are interpreted against the server's local time while
/// stored timestamps are UTC, so both views of the same instant travel
/// together through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanMoment {
    /// Instant recorded into attendance rows and scan results
    pub utc: DateTime<Utc>,
    /// Local date and time-of-day used for ledger keying and window checks
    pub local: NaiveDateTime,
}

impl ScanMoment {
    /// Capture the current instant
    pub fn now() -> Self {
        let local = Local::now();
        Self {
            utc: local.with_timezone(&Utc),
            local: local.naive_local(),
        }
    }

    /// Build a moment from a UTC instant and its local projection
    pub fn from_parts(utc: DateTime<Utc>, local: NaiveDateTime) -> Self {
        Self { utc, local }
    }
}
