//! Scan processing pipeline
//!
//! One scan flows: identity resolution -> daily ledger bootstrap -> window
//! evaluation -> state machine -> device mailbox. Every classified outcome
//! (including rejections) is queued for the device; exactly one outcome
//! code is produced per scan.

use crate::notify::MismatchAlert;
use crate::{db, AppState};
use rollcall_common::api::{sign, ScanResult};
use rollcall_common::messages::{self, Lang};
use rollcall_common::time::ScanMoment;
use rollcall_common::window::Punctuality;
use rollcall_common::{Error, Result};
use tracing::info;

pub mod identity;
pub mod ledger;
pub mod machine;

use identity::Resolution;
use machine::Transition;

/// Validated inputs of one scan request
#[derive(Debug, Clone)]
pub struct ScanInput {
    pub uid: String,
    pub device_uid: String,
    /// Tenant key the device presented, if any
    pub api_key: Option<String>,
}

/// Classify one scan, persist its effects and queue the outcome for the
/// device.
///
/// Errors are persistence failures only; every business outcome (unknown
/// tag, mismatch, outside window, sign-in required, success) is a normal
/// [`ScanResult`].
pub async fn process_scan(
    state: &AppState,
    input: &ScanInput,
    lang: Lang,
    moment: ScanMoment,
) -> Result<ScanResult> {
    let result = classify(state, input, lang, moment).await?;
    state.mailbox.put(&input.device_uid, &result).await?;
    info!(
        device = %input.device_uid,
        sign = result.sign,
        flag = %result.flag,
        "scan classified"
    );
    Ok(result)
}

async fn classify(
    state: &AppState,
    input: &ScanInput,
    lang: Lang,
    moment: ScanMoment,
) -> Result<ScanResult> {
    let resolution = identity::resolve(&state.db, &input.uid, input.api_key.as_deref()).await?;

    let person = match resolution {
        Resolution::Unknown => {
            return Ok(scan_result(
                input,
                moment,
                false,
                None,
                messages::uid_not_registered(lang),
                messages::register_now(lang),
                sign::UNKNOWN_TAG,
            ));
        }
        Resolution::ForeignTenant { person, owner } => {
            let owner = owner.unwrap_or_else(|| messages::another_school(lang).to_string());
            if let Some(key) = &input.api_key {
                state.notifier.mismatch_alert(MismatchAlert {
                    uid: input.uid.clone(),
                    device_uid: input.device_uid.clone(),
                    presented_api_key: key.clone(),
                    owner_tenant: owner.clone(),
                    person_name: person.name.clone(),
                    timestamp: moment.utc,
                });
            }
            let message = messages::mismatch(lang, &owner);
            return Ok(scan_result(
                input,
                moment,
                false,
                Some(person.name),
                &message,
                &message,
                sign::REJECTED,
            ));
        }
        Resolution::Match(person) => person,
    };

    ledger::ensure_day(&state.db, &person, moment.local.date()).await?;

    let Some(settings) = db::time_settings(&state.db, &person.api_key).await? else {
        return Err(Error::NotFound(format!(
            "time settings for tenant of uid {}",
            input.uid
        )));
    };
    let schedule = settings.to_schedule()?;

    let transition = machine::apply(&state.db, &person.guid, moment, &schedule).await?;
    let result = match transition {
        None => scan_result(
            input,
            moment,
            true,
            Some(person.name),
            messages::outside_time(lang),
            messages::outside_flag(lang),
            sign::REJECTED,
        ),
        Some(Transition::SignInRequired) => scan_result(
            input,
            moment,
            true,
            Some(person.name),
            messages::sign_in_first(lang),
            messages::sign_in_flag(lang),
            sign::SIGN_IN_REQUIRED,
        ),
        Some(applied) => {
            let message = transition_message(applied, lang);
            scan_result(input, moment, true, Some(person.name), message, message, sign::OK)
        }
    };

    Ok(result)
}

/// Human message for an accepted (or idempotently repeated) transition
fn transition_message(transition: Transition, lang: Lang) -> &'static str {
    match transition {
        Transition::SignedIn(Punctuality::Late) => messages::late_sign_in(lang),
        Transition::SignedIn(_) | Transition::AlreadySignedIn => messages::signed_in(lang),
        Transition::SignedOut(Punctuality::EarlyLeave) => messages::early_leave(lang),
        Transition::SignedOut(_) | Transition::AlreadySignedOut => messages::signed_out(lang),
        // Mapped to its own outcome before reaching here
        Transition::SignInRequired => messages::sign_in_first(lang),
    }
}

fn scan_result(
    input: &ScanInput,
    moment: ScanMoment,
    exists: bool,
    name: Option<String>,
    message: &str,
    flag: &str,
    sign: u8,
) -> ScanResult {
    ScanResult {
        uid: input.uid.clone(),
        device_uid: input.device_uid.clone(),
        exists,
        name,
        timestamp: moment.utc,
        message: message.to_string(),
        sign,
        flag: flag.to_string(),
    }
}
