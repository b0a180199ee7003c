//! Typed outcomes of response classification.
//!
//! Every finished HTTP exchange resolves to exactly one [`Classification`]:
//! either [`Classification::NoError`] or [`Classification::Failed`] carrying an
//! [`ApiError`] drawn from a closed set of kinds.

use derive_more::{Display, Error, From};

use crate::Error;

/// Result type alias using [`ApiError`].
pub type ApiResult<T> = std::result::Result<T, ApiError>;

// ============================================================================
// Service Errors
// ============================================================================

/// Domain error kinds identified by the service's own error-code scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ServiceErrorKind {
    /// A parameter had an unacceptable value.
    #[display("invalid parameter")]
    InvalidParameter,
    /// A required parameter was not sent.
    #[display("missing parameter")]
    MissingParameter,
    /// The resource already exists (e.g. already following, duplicate group name).
    #[display("already exists")]
    AlreadyExists,
    /// The caller is not a member of the targeted group.
    #[display("not a group member")]
    NotGroupMember,
    /// The message body exceeds the service limit.
    #[display("message too long")]
    MessageTooLong,
    /// Generic bad request.
    #[display("bad request")]
    BadRequest,
    /// The resource does not exist.
    #[display("not found")]
    NotFound,
    /// The request conflicts with the resource state.
    #[display("conflict")]
    Conflict,
    /// The request payload is too large.
    #[display("payload too large")]
    PayloadTooLarge,
    /// The request was understood but cannot be processed.
    #[display("unprocessable entity")]
    Unprocessable,
    /// Any other service-reported error.
    #[display("service error")]
    Other,
}

/// A precise error reported by the service in a structured body.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{kind} ({status}): {message}")]
pub struct ServiceError {
    /// Translated kind.
    pub kind: ServiceErrorKind,
    /// HTTP status code of the response.
    pub status: u16,
    /// Service error code, when the payload carried one.
    pub code: Option<u32>,
    /// Human-readable message.
    pub message: String,
}

// ============================================================================
// Api Error
// ============================================================================

/// Closed set of failures a call to the service can resolve to.
#[derive(Debug, Display, Error, From)]
pub enum ApiError {
    /// Opaque upstream failure (HTTP 500); the body is not machine-readable.
    #[display("internal server error")]
    #[from(skip)]
    ServerError,

    /// The caller exceeded the service rate limit (HTTP 429).
    #[display("rate limit exceeded")]
    #[from(skip)]
    RateLimitExceeded,

    /// Transient connectivity failure: gateway or request timeouts, service
    /// unavailable, or a broken connection while reading the response.
    #[display("connection failure: {_0}")]
    #[from(skip)]
    ConnectionFailure(#[error(not(source))] String),

    /// Credentials were rejected (HTTP 401).
    #[display("unauthorized ({status}): {message}")]
    #[from(skip)]
    Unauthorized {
        /// Response text, with braces stripped.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// Credentials are valid but lack permission (HTTP 403).
    #[display("forbidden ({status}): {message}")]
    #[from(skip)]
    Forbidden {
        /// Response text, verbatim.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// The error body could not be parsed or validated.
    #[display("unexpected error response ({status}): {message}")]
    #[from(skip)]
    Generic {
        /// HTTP status code.
        status: u16,
        /// Raw response text.
        message: String,
    },

    /// A service error identified by its error code.
    #[display("{_0}")]
    #[from]
    Service(ServiceError),

    /// Transport failure that is not a connectivity issue.
    #[display("transport error: {_0}")]
    #[from(skip)]
    Transport(Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Timeout | Error::Connection(_) => Self::ConnectionFailure(err.to_string()),
            other => Self::Transport(other),
        }
    }
}

/// Transport errors compare by their rendered message.
impl PartialEq for ApiError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ServerError, Self::ServerError)
            | (Self::RateLimitExceeded, Self::RateLimitExceeded) => true,
            (Self::ConnectionFailure(a), Self::ConnectionFailure(b)) => a == b,
            (
                Self::Unauthorized { message, status },
                Self::Unauthorized {
                    message: other_message,
                    status: other_status,
                },
            )
            | (
                Self::Forbidden { message, status },
                Self::Forbidden {
                    message: other_message,
                    status: other_status,
                },
            )
            | (
                Self::Generic { status, message },
                Self::Generic {
                    status: other_status,
                    message: other_message,
                },
            ) => status == other_status && message == other_message,
            (Self::Service(a), Self::Service(b)) => a == b,
            (Self::Transport(a), Self::Transport(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

impl ApiError {
    /// Create an unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
            status: 401,
        }
    }

    /// Create a forbidden error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
            status: 403,
        }
    }

    /// Create a generic error from the raw response text.
    #[must_use]
    pub fn generic(status: u16, message: impl Into<String>) -> Self {
        Self::Generic {
            status,
            message: message.into(),
        }
    }

    /// Create a connection failure.
    #[must_use]
    pub fn connection_failure(reason: impl Into<String>) -> Self {
        Self::ConnectionFailure(reason.into())
    }

    /// HTTP status code behind this error, when one is known.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError => Some(500),
            Self::RateLimitExceeded => Some(429),
            Self::Unauthorized { status, .. }
            | Self::Forbidden { status, .. }
            | Self::Generic { status, .. } => Some(*status),
            Self::Service(err) => Some(err.status),
            Self::ConnectionFailure(_) | Self::Transport(_) => None,
        }
    }

    /// Returns `true` for failures a caller's retry policy may retry as-is.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ServerError | Self::RateLimitExceeded | Self::ConnectionFailure(_)
        )
    }

    /// Returns `true` for credential failures (401 or 403).
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::Forbidden { .. })
    }

    /// Translated kind, if this is a service error.
    #[must_use]
    pub const fn service_kind(&self) -> Option<ServiceErrorKind> {
        match self {
            Self::Service(err) => Some(err.kind),
            _ => None,
        }
    }

    /// Diagnostic message carried by this error, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message, .. }
            | Self::Forbidden { message, .. }
            | Self::Generic { message, .. } => Some(message),
            Self::Service(err) => Some(&err.message),
            Self::ConnectionFailure(reason) => Some(reason),
            Self::ServerError | Self::RateLimitExceeded | Self::Transport(_) => None,
        }
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Terminal outcome of classifying one response.
#[derive(Debug, PartialEq, From)]
pub enum Classification {
    /// The response is not a failure.
    #[from(skip)]
    NoError,
    /// The response is a failure of the given kind.
    Failed(ApiError),
}

impl Classification {
    /// Returns `true` if the response was classified as a failure.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The failure, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&ApiError> {
        match self {
            Self::NoError => None,
            Self::Failed(err) => Some(err),
        }
    }

    /// Convert into a `Result`, with `NoError` as `Ok(())`.
    pub fn into_result(self) -> ApiResult<()> {
        match self {
            Self::NoError => Ok(()),
            Self::Failed(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    fn not_found() -> ServiceError {
        ServiceError {
            kind: ServiceErrorKind::NotFound,
            status: 404,
            code: None,
            message: "no such user".to_string(),
        }
    }

    #[test]
    fn api_error_display() {
        insta::assert_snapshot!(ApiError::ServerError, @"internal server error");
        insta::assert_snapshot!(ApiError::RateLimitExceeded, @"rate limit exceeded");
        insta::assert_snapshot!(
            ApiError::unauthorized("\"error\":\"bad token\""),
            @r#"unauthorized (401): "error":"bad token""#
        );
        insta::assert_snapshot!(
            ApiError::from(not_found()),
            @"not found (404): no such user"
        );
    }

    #[test]
    fn transport_timeout_becomes_connection_failure() {
        let_assert!(ApiError::ConnectionFailure(reason) = ApiError::from(Error::Timeout));
        check!(reason == "request timeout");

        let err = ApiError::from(Error::connection("reset"));
        check!(err.is_retryable());
    }

    #[test]
    fn other_transport_errors_are_kept() {
        let err = ApiError::from(Error::invalid_request("bad header"));
        let_assert!(ApiError::Transport(Error::InvalidRequest(msg)) = err);
        check!(msg == "bad header");
    }

    #[test]
    fn api_error_status() {
        check!(ApiError::ServerError.status() == Some(500));
        check!(ApiError::RateLimitExceeded.status() == Some(429));
        check!(ApiError::forbidden("nope").status() == Some(403));
        check!(ApiError::from(not_found()).status() == Some(404));
        check!(ApiError::connection_failure("503 Service Unavailable").status() == None);
    }

    #[test]
    fn api_error_predicates() {
        check!(ApiError::ServerError.is_retryable());
        check!(!ApiError::unauthorized("x").is_retryable());
        check!(ApiError::unauthorized("x").is_auth());
        check!(ApiError::forbidden("x").is_auth());
        check!(!ApiError::generic(400, "x").is_auth());
        check!(ApiError::from(not_found()).service_kind() == Some(ServiceErrorKind::NotFound));
        check!(ApiError::generic(400, "raw").message() == Some("raw"));
    }

    #[test]
    fn api_error_equality() {
        check!(ApiError::generic(400, "a") == ApiError::generic(400, "a"));
        check!(ApiError::generic(400, "a") != ApiError::generic(422, "a"));
        check!(ApiError::unauthorized("a") != ApiError::forbidden("a"));
        check!(
            ApiError::Transport(Error::tls("handshake"))
                == ApiError::Transport(Error::tls("handshake"))
        );
    }

    #[test]
    fn classification_into_result() {
        check!(Classification::NoError.into_result().is_ok());
        check!(!Classification::NoError.is_error());

        let classification = Classification::from(ApiError::ServerError);
        check!(classification.is_error());
        check!(classification.error() == Some(&ApiError::ServerError));
        let_assert!(Err(ApiError::ServerError) = classification.into_result());
    }
}
