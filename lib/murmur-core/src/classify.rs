//! Response classification.
//!
//! [`ResponseClassifier::classify`] resolves a finished HTTP exchange to one
//! [`Classification`]. Status codes are checked first against the ordered
//! [`FastPath`] table; only when none matches is the body read, parsed into an
//! [`ErrorPayload`], validated and handed to the [`ErrorTranslator`].
//!
//! | Status | Body | Result |
//! |---|---|---|
//! | 500 | any | [`ApiError::ServerError`] |
//! | 429 | any | [`ApiError::RateLimitExceeded`] |
//! | 504, 503, 408 | any | [`ApiError::ConnectionFailure`] |
//! | 401 | any | [`ApiError::Unauthorized`], braces stripped |
//! | 403 | any | [`ApiError::Forbidden`], verbatim |
//! | other | empty | [`Classification::NoError`] |
//! | other | valid payload | translated error |
//! | other | anything else | [`ApiError::Generic`] with the raw text |

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::body::lossy_text;
use crate::{
    ApiError, Classification, Error, ErrorPayload, ErrorTranslator, Response, Result,
    ServiceErrorTranslator, deserialize_payload,
};

/// Returns `true` for statuses that should go through classification (4xx and 5xx).
#[must_use]
pub const fn has_error(status: u16) -> bool {
    status >= 400 && status < 600
}

// ============================================================================
// Classifiable Response
// ============================================================================

/// A response the classifier can inspect.
///
/// The body is read at most once, and only when no status rule settles the
/// outcome without it.
pub trait ClassifiableResponse: Send {
    /// HTTP status code.
    fn status(&self) -> u16;

    /// Read the whole body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be read (broken connection, timeout).
    fn into_bytes(self) -> impl Future<Output = Result<Bytes>> + Send;
}

impl ClassifiableResponse for Response<Bytes> {
    fn status(&self) -> u16 {
        Response::status(self)
    }

    fn into_bytes(self) -> impl Future<Output = Result<Bytes>> + Send {
        std::future::ready(Ok(self.into_body()))
    }
}

#[cfg(feature = "streaming")]
impl ClassifiableResponse for crate::StreamingResponse {
    fn status(&self) -> u16 {
        crate::StreamingResponse::status(self)
    }

    fn into_bytes(self) -> impl Future<Output = Result<Bytes>> + Send {
        async move { self.collect().await.map(Response::into_body) }
    }
}

// ============================================================================
// Fast Paths
// ============================================================================

/// Status-code rules that resolve a response without parsing its body.
///
/// Rules are evaluated in [`FastPath::ORDERED`] order and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FastPath {
    /// 500: the service answers with an HTML page, never parsed.
    ServerError,
    /// 429: service rate-limit convention.
    RateLimitExceeded,
    /// 504, 503, 408: transient connectivity failures.
    ConnectionFailure,
    /// 401: body text with `{` and `}` removed.
    Unauthorized,
    /// 403: body text as-is.
    Forbidden,
}

impl FastPath {
    /// All rules, in evaluation order.
    pub const ORDERED: [Self; 5] = [
        Self::ServerError,
        Self::RateLimitExceeded,
        Self::ConnectionFailure,
        Self::Unauthorized,
        Self::Forbidden,
    ];

    /// Status codes handled by this rule.
    #[must_use]
    pub const fn statuses(self) -> &'static [u16] {
        match self {
            Self::ServerError => &[500],
            Self::RateLimitExceeded => &[429],
            Self::ConnectionFailure => &[504, 503, 408],
            Self::Unauthorized => &[401],
            Self::Forbidden => &[403],
        }
    }

    /// Returns `true` if this rule handles `status`.
    #[must_use]
    pub fn matches(self, status: u16) -> bool {
        self.statuses().contains(&status)
    }

    /// First rule, in evaluation order, that handles `status`.
    #[must_use]
    pub fn first_match(status: u16) -> Option<Self> {
        Self::ORDERED.into_iter().find(|rule| rule.matches(status))
    }

    /// Returns `true` if the rule needs the body text to build its error.
    #[must_use]
    pub const fn reads_body(self) -> bool {
        matches!(self, Self::Unauthorized | Self::Forbidden)
    }

    /// Build this rule's error. `text` is ignored by rules that do not read the body.
    #[must_use]
    pub fn resolve(self, status: u16, text: &str) -> ApiError {
        match self {
            Self::ServerError => ApiError::ServerError,
            Self::RateLimitExceeded => ApiError::RateLimitExceeded,
            Self::ConnectionFailure => ApiError::ConnectionFailure(status_reason(status)),
            Self::Unauthorized => ApiError::Unauthorized {
                message: strip_braces(text),
                status,
            },
            Self::Forbidden => ApiError::Forbidden {
                message: text.to_string(),
                status,
            },
        }
    }
}

fn status_reason(status: u16) -> String {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map_or_else(|| format!("HTTP {status}"), |reason| format!("HTTP {status} {reason}"))
}

// 401 bodies sometimes come back as partial JSON fragments
fn strip_braces(text: &str) -> String {
    if text.contains('{') {
        text.replace(['{', '}'], "")
    } else {
        text.to_string()
    }
}

// ============================================================================
// Classifier
// ============================================================================

/// Turns finished HTTP exchanges into [`Classification`]s.
///
/// Stateless apart from its translator, so one classifier can be shared by
/// any number of concurrent calls.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use bytes::Bytes;
/// use murmur_core::{ApiError, Classification, Response, ResponseClassifier};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let classifier = ResponseClassifier::new();
/// let response = Response::new(429, HashMap::new(), Bytes::from("slow down"));
///
/// let outcome = classifier.classify(response).await;
/// assert_eq!(outcome, Classification::Failed(ApiError::RateLimitExceeded));
/// # }
/// ```
#[derive(Debug)]
pub struct ResponseClassifier<T = ServiceErrorTranslator> {
    translator: Arc<T>,
}

impl<T> Clone for ResponseClassifier<T> {
    fn clone(&self) -> Self {
        Self {
            translator: Arc::clone(&self.translator),
        }
    }
}

impl ResponseClassifier {
    /// Classifier using the [`ServiceErrorTranslator`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_translator(ServiceErrorTranslator)
    }
}

impl Default for ResponseClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ErrorTranslator> ResponseClassifier<T> {
    /// Classifier using a custom translator.
    #[must_use]
    pub fn with_translator(translator: T) -> Self {
        Self {
            translator: Arc::new(translator),
        }
    }

    /// The translator used for structured error bodies.
    #[must_use]
    pub fn translator(&self) -> &T {
        &self.translator
    }

    /// Classify a finished exchange.
    ///
    /// Never fails: a body that cannot be read resolves to
    /// [`ApiError::ConnectionFailure`] (or [`ApiError::Transport`]).
    pub async fn classify<R: ClassifiableResponse>(&self, response: R) -> Classification {
        let status = response.status();

        if let Some(rule) = FastPath::first_match(status) {
            debug!(status, ?rule, "status fast path matched");
            if !rule.reads_body() {
                return rule.resolve(status, "").into();
            }
            return match response.into_bytes().await {
                Ok(bytes) => rule.resolve(status, &lossy_text(&bytes)).into(),
                Err(err) => Self::read_failed(status, err),
            };
        }

        let bytes = match response.into_bytes().await {
            Ok(bytes) => bytes,
            Err(err) => return Self::read_failed(status, err),
        };

        if bytes.is_empty() {
            debug!(status, "empty body, not an error");
            return Classification::NoError;
        }

        Classification::Failed(self.classify_body(status, &bytes))
    }

    /// Resolve a non-empty body that no fast path handled.
    #[must_use]
    pub fn classify_body(&self, status: u16, body: &[u8]) -> ApiError {
        match deserialize_payload(body) {
            Ok(payload) if payload.is_valid() => self.translate(status, &payload),
            Ok(_) => {
                warn!(status, "error body has neither code nor message");
                ApiError::generic(status, lossy_text(body))
            }
            Err(err) => {
                warn!(status, error = %err, "error body is not a structured error");
                ApiError::generic(status, lossy_text(body))
            }
        }
    }

    fn translate(&self, status: u16, payload: &ErrorPayload) -> ApiError {
        let err = self.translator.translate(status, payload);
        debug!(status, code = ?payload.code, error = %err, "translated service error");
        err
    }

    fn read_failed(status: u16, err: Error) -> Classification {
        warn!(status, error = %err, "failed to read response body");
        Classification::Failed(err.into())
    }
}
