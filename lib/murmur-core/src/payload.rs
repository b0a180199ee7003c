//! Structured error bodies reported by the service.
//!
//! The service reports errors either as a flat object or wrapped in a
//! `response` envelope:
//!
//! ```json
//! {"code": 17, "message": "Already following this user"}
//! {"response": {"code": 17, "message": "Already following this user", "stat": "fail"}}
//! ```

use serde::{Deserialize, Deserializer};

use crate::Result;

/// A structured error as reported by the service.
///
/// A payload can parse successfully and still carry nothing useful (e.g. `{}`);
/// [`ErrorPayload::is_valid`] tells the two apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorPayload {
    /// Service error code. Sent as a number or a numeric string.
    #[serde(default, deserialize_with = "deserialize_code")]
    pub code: Option<u32>,
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Status marker, usually `"fail"`.
    #[serde(default)]
    pub stat: Option<String>,
}

impl ErrorPayload {
    /// Returns `true` if the payload carries a code or a non-blank message.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.code.is_some() || self.message().is_some()
    }

    /// The message, if present and not blank.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WirePayload {
    Enveloped { response: ErrorPayload },
    Flat(ErrorPayload),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCode {
    Number(u32),
    Text(String),
}

fn deserialize_code<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let code = match Option::<RawCode>::deserialize(deserializer)? {
        Some(RawCode::Number(code)) => Some(code),
        // Non-numeric codes carry no meaning for translation
        Some(RawCode::Text(text)) => text.trim().parse().ok(),
        None => None,
    };
    Ok(code)
}

/// Parse response bytes into an [`ErrorPayload`].
///
/// Never panics: malformed or truncated JSON, or a JSON value that is not an
/// object, is reported as [`crate::Error::JsonDeserialization`].
pub fn deserialize_payload(bytes: &[u8]) -> Result<ErrorPayload> {
    let payload = match crate::from_json::<WirePayload>(bytes)? {
        WirePayload::Enveloped { response } => response,
        WirePayload::Flat(payload) => payload,
    };
    Ok(payload)
}
