//! Shared scan API request/response types
//!
//! These are the wire shapes exchanged with the reader devices. The numeric
//! `sign` codes are interpreted by device firmware and form a fixed
//! contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric scan outcome codes consumed by reader firmware.
///
/// The values are a wire contract with deployed hardware and must never be
/// renumbered.
pub mod sign {
    /// Rejected: outside windows, tenant mismatch, validation or server error
    pub const REJECTED: u8 = 0;
    /// Transition applied (or idempotent repeat of an applied transition)
    pub const OK: u8 = 1;
    /// Tag not enrolled under any tenant; device should offer registration
    pub const UNKNOWN_TAG: u8 = 2;
    /// Sign-out attempted before sign-in
    pub const SIGN_IN_REQUIRED: u8 = 3;
}

/// Body of `POST /scan`.
///
/// All fields arrive as strings from the device; `uid` and `device_uid` are
/// validated as present and non-blank before any processing. The tenant key
/// may alternatively be supplied via the `x-api-key` header or the
/// `api_key` query parameter (header wins).
#[derive(Debug, Clone, Deserialize)]
pub struct ScanRequest {
    /// RFID tag identifier as read by the device
    pub uid: Option<String>,
    /// Identifier of the scanning device
    pub device_uid: Option<String>,
    /// API key of the tenant the device claims to belong to
    pub api_key: Option<String>,
}

/// Classified outcome of one scan.
///
/// Returned from `POST /scan` and held (at most one per device) for
/// `GET /scan/queue` polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub uid: String,
    pub device_uid: String,
    /// Whether the tag resolved to an enrollment under the scanning tenant
    pub exists: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    /// Outcome code from [`sign`]
    pub sign: u8,
    /// Short string shown on the reader's display
    pub flag: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_request_tolerates_missing_fields() {
        let req: ScanRequest = serde_json::from_str("{}").unwrap();
        assert!(req.uid.is_none());
        assert!(req.device_uid.is_none());
        assert!(req.api_key.is_none());
    }

    #[test]
    fn test_scan_result_round_trips_through_json() {
        let result = ScanResult {
            uid: "04AA11".into(),
            device_uid: "gate-1".into(),
            exists: true,
            name: Some("Ada".into()),
            timestamp: Utc::now(),
            message: "Signed in".into(),
            sign: sign::OK,
            flag: "Signed in".into(),
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: ScanResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.uid, result.uid);
        assert_eq!(back.sign, sign::OK);
        assert_eq!(back.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_absent_name_is_omitted_from_json() {
        let result = ScanResult {
            uid: "04AA11".into(),
            device_uid: "gate-1".into(),
            exists: false,
            name: None,
            timestamp: Utc::now(),
            message: "New UID - Registration required".into(),
            sign: sign::UNKNOWN_TAG,
            flag: "Register now".into(),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("\"name\""));
        assert!(json.contains("\"sign\":2"));

        // The omitted field must still deserialize (mailbox round trip)
        let back: ScanResult = serde_json::from_str(&json).unwrap();
        assert!(back.name.is_none());
    }
}
