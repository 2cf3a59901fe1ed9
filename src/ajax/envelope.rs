//! Failure envelopes returned by the server on validation and other errors.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// Reason shown for `missing_parameters` subjects
pub const MISSING_REASON: &str = "Is required and missing.";

/// Reason shown when a subject has no reason entry
pub const UNKNOWN_REASON: &str = "Unknown";

/// Classified `errorCode` of a failure envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidParameters,
    MissingParameters,
    /// Anything else, including an absent code (empty string)
    Other(String),
}

impl ErrorCode {
    pub fn parse(code: &str) -> Self {
        match code {
            "invalid_parameters" => ErrorCode::InvalidParameters,
            "missing_parameters" => ErrorCode::MissingParameters,
            other => ErrorCode::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::InvalidParameters => "invalid_parameters",
            ErrorCode::MissingParameters => "missing_parameters",
            ErrorCode::Other(code) => code,
        }
    }

    /// Whether the error maps onto individual fields
    pub fn is_field_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::InvalidParameters | ErrorCode::MissingParameters
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed failure envelope.
///
/// The raw JSON is kept so generic failures can be shown verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub code: ErrorCode,
    pub reasons: BTreeMap<String, String>,
    pub subjects: Vec<String>,
    pub raw: Value,
}

impl Envelope {
    /// Read an envelope out of any JSON value.
    ///
    /// The code is taken from `errorCode`, or the legacy `error` key. Entries
    /// of the wrong shape are ignored rather than rejected.
    pub fn from_value(raw: Value) -> Self {
        let code = raw
            .get("errorCode")
            .or_else(|| raw.get("error"))
            .and_then(Value::as_str)
            .map(ErrorCode::parse)
            .unwrap_or_else(|| ErrorCode::Other(String::new()));

        let reasons = raw
            .get("reasons")
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        let subjects = raw
            .get("subjects")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            code,
            reasons,
            subjects,
            raw,
        }
    }

    /// Explanation shown next to a subject's control
    pub fn reason_for(&self, subject: &str) -> &str {
        match self.code {
            ErrorCode::InvalidParameters => self
                .reasons
                .get(subject)
                .map(String::as_str)
                .unwrap_or(UNKNOWN_REASON),
            ErrorCode::MissingParameters => MISSING_REASON,
            ErrorCode::Other(_) => UNKNOWN_REASON,
        }
    }
}
