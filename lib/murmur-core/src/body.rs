//! Body encoding and decoding.

use bytes::Bytes;

use crate::Result;

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialize a value to JSON bytes.
///
/// # Example
///
/// ```
/// use murmur_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct NewMessage { body: String, group_id: u64 }
///
/// let message = NewMessage { body: "hello".to_string(), group_id: 7 };
/// let bytes = to_json(&message).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"body":"hello","group_id":7}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes with path-aware error messages.
///
/// Failures carry the path to the offending field (e.g. `response.code`),
/// courtesy of `serde_path_to_error`.
///
/// # Example
///
/// ```
/// use murmur_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct User { name: String }
///
/// let user: User = from_json(br#"{"name":"Alice"}"#).expect("deserialize");
/// assert_eq!(user, User { name: "Alice".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

/// Decode a body as text, replacing invalid UTF-8 sequences.
pub(crate) fn lossy_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_as_str() {
        assert_eq!(ContentType::Json.as_str(), "application/json");
        assert_eq!(ContentType::Json.to_string(), "application/json");
    }

    #[test]
    fn from_json_syntax_error() {
        #[derive(Debug, serde::Deserialize)]
        struct Topic {
            #[allow(dead_code)]
            name: String,
        }

        let result: Result<Topic> = from_json(b"{\"name\":");
        let err = result.expect_err("should fail");
        assert!(err.to_string().contains("JSON deserialization error"));
    }

    #[test]
    fn from_json_error_has_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Sender {
            #[allow(dead_code)]
            id: u64,
        }

        #[derive(Debug, serde::Deserialize)]
        struct Message {
            #[allow(dead_code)]
            sender: Sender,
        }

        let result: Result<Message> = from_json(br#"{"sender":{"id":"abc"}}"#);
        let msg = result.expect_err("should fail").to_string();
        assert!(msg.contains("sender.id"), "Expected path in error: {msg}");
    }

    #[test]
    fn lossy_text_replaces_invalid_utf8() {
        assert_eq!(lossy_text(b"ok"), "ok");
        assert_eq!(lossy_text(&[b'a', 0xff, b'b']), "a\u{fffd}b");
    }
}
