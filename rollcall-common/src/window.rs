//! Tenant time-window evaluation and punctuality classification
//!
//! Each tenant configures a sign-in window and a sign-out window as
//! times-of-day, plus two policy knobs: a grace period after the sign-in
//! window during which a (late) sign-in is still accepted, and an optional
//! early-leave boundary inside the sign-out window.

use crate::{Error, Result};
use chrono::{Duration, NaiveTime};

/// Punctuality of an accepted transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punctuality {
    OnTime,
    Late,
    EarlyLeave,
}

impl Punctuality {
    /// Stable string form stored in attendance rows
    pub fn as_str(&self) -> &'static str {
        match self {
            Punctuality::OnTime => "on_time",
            Punctuality::Late => "late",
            Punctuality::EarlyLeave => "early_leave",
        }
    }
}

/// A time-of-day interval, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Whether `t` falls within `[start, end]`
    pub fn contains(&self, t: NaiveTime) -> bool {
        t >= self.start && t <= self.end
    }
}

/// One tenant's scan windows and punctuality policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantSchedule {
    pub sign_in: TimeWindow,
    pub sign_out: TimeWindow,
    /// Sign-ins within this long after `sign_in.end` are accepted as late
    pub late_grace: Duration,
    /// Sign-outs before this boundary classify as early leave
    pub early_leave_before: Option<NaiveTime>,
}

impl TenantSchedule {
    /// Classify a sign-in attempt at time-of-day `t`.
    ///
    /// Returns `None` when `t` is neither inside the sign-in window nor
    /// inside the grace period following it.
    pub fn classify_sign_in(&self, t: NaiveTime) -> Option<Punctuality> {
        if self.sign_in.contains(t) {
            return Some(Punctuality::OnTime);
        }
        let past_end = t.signed_duration_since(self.sign_in.end);
        if past_end > Duration::zero() && past_end <= self.late_grace {
            return Some(Punctuality::Late);
        }
        None
    }

    /// Classify a sign-out attempt at time-of-day `t`.
    ///
    /// Returns `None` outside the sign-out window. Inside it, the sign-out
    /// is an early leave when the tenant has set a boundary and `t` is
    /// before it, otherwise on time.
    pub fn classify_sign_out(&self, t: NaiveTime) -> Option<Punctuality> {
        if !self.sign_out.contains(t) {
            return None;
        }
        match self.early_leave_before {
            Some(boundary) if t < boundary => Some(Punctuality::EarlyLeave),
            _ => Some(Punctuality::OnTime),
        }
    }
}

/// Parse a stored `HH:MM:SS` (or `HH:MM`) time-of-day string
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| Error::InvalidInput(format!("malformed time of day: {s:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn schedule(grace_minutes: i64, early_leave_before: Option<NaiveTime>) -> TenantSchedule {
        TenantSchedule {
            sign_in: TimeWindow::new(t(7, 0, 0), t(8, 30, 0)),
            sign_out: TimeWindow::new(t(15, 0, 0), t(17, 0, 0)),
            late_grace: Duration::minutes(grace_minutes),
            early_leave_before,
        }
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let w = TimeWindow::new(t(7, 0, 0), t(8, 30, 0));
        assert!(w.contains(t(7, 0, 0)));
        assert!(w.contains(t(8, 30, 0)));
        assert!(w.contains(t(7, 45, 12)));
        assert!(!w.contains(t(6, 59, 59)));
        assert!(!w.contains(t(8, 30, 1)));
    }

    #[test]
    fn test_sign_in_inside_window_is_on_time() {
        let s = schedule(0, None);
        assert_eq!(s.classify_sign_in(t(7, 0, 0)), Some(Punctuality::OnTime));
        assert_eq!(s.classify_sign_in(t(8, 30, 0)), Some(Punctuality::OnTime));
    }

    #[test]
    fn test_sign_in_after_window_without_grace_is_rejected() {
        let s = schedule(0, None);
        assert_eq!(s.classify_sign_in(t(8, 30, 1)), None);
        assert_eq!(s.classify_sign_in(t(6, 30, 0)), None);
    }

    #[test]
    fn test_sign_in_within_grace_is_late() {
        let s = schedule(15, None);
        assert_eq!(s.classify_sign_in(t(8, 31, 0)), Some(Punctuality::Late));
        assert_eq!(s.classify_sign_in(t(8, 45, 0)), Some(Punctuality::Late));
        assert_eq!(s.classify_sign_in(t(8, 45, 1)), None);
    }

    #[test]
    fn test_grace_does_not_extend_before_window() {
        let s = schedule(15, None);
        assert_eq!(s.classify_sign_in(t(6, 50, 0)), None);
    }

    #[test]
    fn test_sign_out_outside_window_is_rejected() {
        let s = schedule(0, None);
        assert_eq!(s.classify_sign_out(t(14, 59, 59)), None);
        assert_eq!(s.classify_sign_out(t(17, 0, 1)), None);
    }

    #[test]
    fn test_sign_out_without_boundary_is_on_time() {
        let s = schedule(0, None);
        assert_eq!(s.classify_sign_out(t(15, 0, 0)), Some(Punctuality::OnTime));
        assert_eq!(s.classify_sign_out(t(17, 0, 0)), Some(Punctuality::OnTime));
    }

    #[test]
    fn test_sign_out_before_boundary_is_early_leave() {
        let s = schedule(0, Some(t(16, 0, 0)));
        assert_eq!(s.classify_sign_out(t(15, 30, 0)), Some(Punctuality::EarlyLeave));
        assert_eq!(s.classify_sign_out(t(16, 0, 0)), Some(Punctuality::OnTime));
        assert_eq!(s.classify_sign_out(t(16, 30, 0)), Some(Punctuality::OnTime));
    }

    #[test]
    fn test_parse_time_of_day_formats() {
        assert_eq!(parse_time_of_day("07:30:00").unwrap(), t(7, 30, 0));
        assert_eq!(parse_time_of_day("07:30").unwrap(), t(7, 30, 0));
        assert!(parse_time_of_day("7h30").is_err());
        assert!(parse_time_of_day("25:00:00").is_err());
        assert!(parse_time_of_day("").is_err());
    }

    #[test]
    fn test_punctuality_storage_strings() {
        assert_eq!(Punctuality::OnTime.as_str(), "on_time");
        assert_eq!(Punctuality::Late.as_str(), "late");
        assert_eq!(Punctuality::EarlyLeave.as_str(), "early_leave");
    }
}
