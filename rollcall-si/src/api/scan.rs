//! Scan intake endpoints
//!
//! `POST /scan` classifies a tag scan; `GET /scan/queue` lets the device
//! poll for (and consume) its latest pending outcome.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

use rollcall_common::api::{sign, ScanRequest, ScanResult};
use rollcall_common::messages::{self, Lang};
use rollcall_common::time::ScanMoment;
use rollcall_common::Error;

use crate::scan::{self, ScanInput};
use crate::AppState;

/// Query parameters accepted by `POST /scan`
#[derive(Debug, Deserialize)]
pub struct ScanQuery {
    pub api_key: Option<String>,
}

/// Query parameters for `GET /scan/queue`
#[derive(Debug, Deserialize)]
pub struct QueueQuery {
    pub device_uid: Option<String>,
}

/// POST /scan
///
/// Body: `{uid, device_uid, api_key?}`. Missing or blank `uid`/`device_uid`
/// is rejected with 400 before any state change. Every classified outcome
/// returns 200 with the outcome code in `sign`; a store failure returns 500
/// (and still leaves a terminal result in the device's mailbox so a polling
/// device is not left waiting).
pub async fn post_scan(
    State(state): State<AppState>,
    Query(query): Query<ScanQuery>,
    headers: HeaderMap,
    Json(body): Json<ScanRequest>,
) -> Response {
    let lang = lang_from(&headers);
    let moment = ScanMoment::now();

    let uid = body.uid.as_deref().map(str::trim).unwrap_or("");
    let device_uid = body.device_uid.as_deref().map(str::trim).unwrap_or("");
    if uid.is_empty() || device_uid.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "message": messages::missing_fields(lang),
                "sign": sign::REJECTED,
            })),
        )
            .into_response();
    }

    // Header key wins over query parameter over body field
    let api_key = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .or(query.api_key)
        .or(body.api_key.clone());

    let input = ScanInput {
        uid: uid.to_string(),
        device_uid: device_uid.to_string(),
        api_key,
    };

    match scan::process_scan(&state, &input, lang, moment).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(Error::NotFound(_)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "message": messages::time_settings_not_found(lang),
                "sign": sign::REJECTED,
            })),
        )
            .into_response(),
        Err(Error::InvalidInput(detail)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "message": detail,
                "sign": sign::REJECTED,
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, device = %input.device_uid, "scan processing failed");

            // Leave a terminal result for the polling device as well.
            let failure = ScanResult {
                uid: input.uid.clone(),
                device_uid: input.device_uid.clone(),
                exists: false,
                name: None,
                timestamp: moment.utc,
                message: messages::scan_failed(lang).to_string(),
                sign: sign::REJECTED,
                flag: "Error".to_string(),
            };
            if let Err(put_err) = state.mailbox.put(&input.device_uid, &failure).await {
                warn!(error = %put_err, "could not queue failure result for device");
            }

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "message": messages::scan_failed(lang),
                    "sign": sign::REJECTED,
                })),
            )
                .into_response()
        }
    }
}

/// GET /scan/queue?device_uid=...
///
/// Returns a JSON array with zero or one elements; reading clears the
/// device's mailbox entry.
pub async fn get_scan_queue(
    State(state): State<AppState>,
    Query(query): Query<QueueQuery>,
    headers: HeaderMap,
) -> Response {
    let lang = lang_from(&headers);

    let device_uid = query.device_uid.as_deref().map(str::trim).unwrap_or("");
    if device_uid.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": messages::device_required(lang) })),
        )
            .into_response();
    }

    match state.mailbox.take(device_uid).await {
        Ok(Some(result)) => (StatusCode::OK, Json(vec![result])).into_response(),
        Ok(None) => (StatusCode::OK, Json(Vec::<ScanResult>::new())).into_response(),
        Err(e) => {
            error!(error = %e, device = %device_uid, "mailbox read failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": messages::scan_failed(lang) })),
            )
                .into_response()
        }
    }
}

fn lang_from(headers: &HeaderMap) -> Lang {
    Lang::from_accept_language(
        headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok()),
    )
}
