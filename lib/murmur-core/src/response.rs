//! HTTP responses.
//!
//! [`Response`] is the buffered snapshot of a finished exchange. With the
//! `streaming` feature, [`streaming::StreamingResponse`] keeps the body as a
//! stream until the classifier (or the caller) reads it.

use std::collections::HashMap;

use bytes::Bytes;

// ============================================================================
// Streaming Response (feature-gated)
// ============================================================================

/// Streaming response support (requires `streaming` feature).
#[cfg(feature = "streaming")]
pub mod streaming {
    use std::collections::HashMap;
    use std::pin::Pin;

    use bytes::{Bytes, BytesMut};
    use futures_core::Stream;
    use futures_util::StreamExt;

    /// A streaming body: chunks of bytes arriving over time.
    pub type StreamingBody = Pin<Box<dyn Stream<Item = crate::Result<Bytes>> + Send>>;

    /// HTTP response whose body has not been read yet.
    pub struct StreamingResponse {
        status: u16,
        headers: HashMap<String, String>,
        body: StreamingBody,
    }

    impl std::fmt::Debug for StreamingResponse {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("StreamingResponse")
                .field("status", &self.status)
                .field("headers", &self.headers)
                .finish_non_exhaustive()
        }
    }

    impl StreamingResponse {
        /// Creates a new streaming response.
        #[must_use]
        pub fn new(status: u16, headers: HashMap<String, String>, body: StreamingBody) -> Self {
            Self {
                status,
                headers,
                body,
            }
        }

        /// HTTP status code.
        #[must_use]
        pub const fn status(&self) -> u16 {
            self.status
        }

        /// Response headers.
        #[must_use]
        pub fn headers(&self) -> &HashMap<String, String> {
            &self.headers
        }

        /// Consume into the streaming body.
        #[must_use]
        pub fn into_body(self) -> StreamingBody {
            self.body
        }

        /// Read the whole stream into a buffered [`super::Response`].
        ///
        /// # Errors
        ///
        /// Returns the first chunk error; chunks read so far are dropped.
        pub async fn collect(self) -> crate::Result<super::Response<Bytes>> {
            let mut body = self.body;
            let mut collected = BytesMut::new();

            while let Some(chunk) = body.next().await {
                collected.extend_from_slice(&chunk?);
            }

            Ok(super::Response::new(
                self.status,
                self.headers,
                collected.freeze(),
            ))
        }
    }
}

// ============================================================================
// Buffered Response
// ============================================================================

/// HTTP response with status, headers, and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response<B = Bytes> {
    status: u16,
    headers: HashMap<String, String>,
    body: B,
}

impl<B> Response<B> {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: B) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// Consume into body.
    #[must_use]
    pub fn into_body(self) -> B {
        self.body
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 4xx or 5xx.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        crate::has_error(self.status)
    }
}

impl Response<Bytes> {
    /// Deserialize the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        crate::from_json(&self.body)
    }

    /// Response body as text; invalid UTF-8 sequences are replaced.
    #[must_use]
    pub fn text(&self) -> String {
        crate::body::lossy_text(&self.body)
    }
}
