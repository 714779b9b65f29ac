//! Attendance state machine
//!
//! A daily record moves absent -> partial -> present; partial only via
//! sign-in, present only via a later sign-out. Transitions are applied as
//! single conditional UPDATEs guarded on the flag being clear, so two
//! concurrent scans for the same person can never double-apply a
//! transition or clobber each other's timestamps. Status is recomputed
//! inside the same statement.

use rollcall_common::db::models::AttendanceRecord;
use rollcall_common::time::ScanMoment;
use rollcall_common::window::{Punctuality, TenantSchedule};
use rollcall_common::{Error, Result};
use sqlx::SqlitePool;

/// What a scan did to the person's daily record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    SignedIn(Punctuality),
    /// Sign-in window scan while already signed in; nothing changed
    AlreadySignedIn,
    SignedOut(Punctuality),
    /// Sign-out window scan while already signed out; nothing changed
    AlreadySignedOut,
    /// Sign-out window scan with no prior sign-in; nothing changed
    SignInRequired,
}

/// Apply the transition implied by the windows open at `moment`.
///
/// Returns `None` when the moment is outside both windows (and the grace
/// period). When both windows are open, sign-in is attempted first and a
/// scanner who is already signed in falls through to sign-out.
pub async fn apply(
    pool: &SqlitePool,
    person_guid: &str,
    moment: ScanMoment,
    schedule: &TenantSchedule,
) -> Result<Option<Transition>> {
    let tod = moment.local.time();
    let sign_in = schedule.classify_sign_in(tod);
    let sign_out = schedule.classify_sign_out(tod);

    if let Some(punctuality) = sign_in {
        if try_sign_in(pool, person_guid, moment, punctuality).await? {
            return Ok(Some(Transition::SignedIn(punctuality)));
        }
        // Already signed in today
        match sign_out {
            Some(out_punctuality) => Ok(Some(
                sign_out_transition(pool, person_guid, moment, out_punctuality).await?,
            )),
            None => Ok(Some(Transition::AlreadySignedIn)),
        }
    } else if let Some(punctuality) = sign_out {
        Ok(Some(
            sign_out_transition(pool, person_guid, moment, punctuality).await?,
        ))
    } else {
        Ok(None)
    }
}

/// Conditionally mark the record signed-in. Returns false when the sign-in
/// flag was already set (the guard makes re-sign-in a no-op).
async fn try_sign_in(
    pool: &SqlitePool,
    person_guid: &str,
    moment: ScanMoment,
    punctuality: Punctuality,
) -> Result<bool> {
    let updated = sqlx::query(
        r#"
        UPDATE attendance
        SET signed_in = 1,
            sign_in_time = ?,
            punctuality = ?,
            status = CASE WHEN signed_out = 1 THEN 'present' ELSE 'partial' END
        WHERE person_guid = ? AND date = ? AND signed_in = 0
        "#,
    )
    .bind(moment.utc)
    .bind(punctuality.as_str())
    .bind(person_guid)
    .bind(moment.local.date())
    .execute(pool)
    .await?;

    Ok(updated.rows_affected() > 0)
}

/// Sign-out path: conditional update guarded on signed_in set and
/// signed_out clear, then disambiguate a no-op by reading the record.
async fn sign_out_transition(
    pool: &SqlitePool,
    person_guid: &str,
    moment: ScanMoment,
    punctuality: Punctuality,
) -> Result<Transition> {
    // An early leave overrides the sign-in punctuality; otherwise the
    // sign-in classification is kept (or on_time if somehow unset).
    let early = punctuality == Punctuality::EarlyLeave;
    let updated = sqlx::query(
        r#"
        UPDATE attendance
        SET signed_out = 1,
            sign_out_time = ?,
            punctuality = CASE WHEN ? THEN 'early_leave' ELSE COALESCE(punctuality, 'on_time') END,
            status = 'present'
        WHERE person_guid = ? AND date = ? AND signed_in = 1 AND signed_out = 0
        "#,
    )
    .bind(moment.utc)
    .bind(early)
    .bind(person_guid)
    .bind(moment.local.date())
    .execute(pool)
    .await?;

    if updated.rows_affected() > 0 {
        return Ok(Transition::SignedOut(punctuality));
    }

    let record = fetch_record(pool, person_guid, moment).await?;
    if !record.signed_in {
        Ok(Transition::SignInRequired)
    } else {
        Ok(Transition::AlreadySignedOut)
    }
}

async fn fetch_record(
    pool: &SqlitePool,
    person_guid: &str,
    moment: ScanMoment,
) -> Result<AttendanceRecord> {
    sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT id, person_guid, api_key, date, signed_in, signed_out,
               sign_in_time, sign_out_time, punctuality, status
        FROM attendance WHERE person_guid = ? AND date = ?
        "#,
    )
    .bind(person_guid)
    .bind(moment.local.date())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound(format!("attendance record for person {person_guid}")))
}
