//! Translation of structured service errors into [`ApiError`] values.
//!
//! [`ErrorTranslator`] is the single place where service error codes are
//! mapped to typed errors. The classifier only calls it with payloads that
//! passed [`ErrorPayload::is_valid`].
//!
//! The table in [`codes`] is a placeholder default, not a copy of the
//! service's published error reference. Deployments that need the full code
//! list plug their own [`ErrorTranslator`] into the classifier; unknown codes
//! already fall back on the status, so a missing entry degrades to a coarser
//! kind rather than a wrong one.

use crate::{ApiError, ErrorPayload, ServiceError, ServiceErrorKind};

/// Default service error codes understood by [`ServiceErrorTranslator`].
///
/// Placeholder values; they are not sourced from the service's error
/// reference. Override the translator to map the codes your service returns.
pub mod codes {
    /// A parameter had an unacceptable value.
    pub const INVALID_PARAMETER: u32 = 1;
    /// A required parameter was not sent.
    pub const MISSING_PARAMETER: u32 = 2;
    /// The resource already exists.
    pub const ALREADY_EXISTS: u32 = 17;
    /// The caller is not a member of the group.
    pub const NOT_GROUP_MEMBER: u32 = 22;
    /// The message body is over the length limit.
    pub const MESSAGE_TOO_LONG: u32 = 33;
}

/// Maps a status code and a valid payload to a typed error.
///
/// Implementations must be deterministic: the same `(status, payload)` pair
/// always yields the same error.
///
/// # Example
///
/// ```
/// use murmur_core::{ApiError, ErrorPayload, ErrorTranslator};
///
/// struct PlainTranslator;
///
/// impl ErrorTranslator for PlainTranslator {
///     fn translate(&self, status: u16, payload: &ErrorPayload) -> ApiError {
///         ApiError::generic(status, payload.message().unwrap_or_default())
///     }
/// }
/// ```
pub trait ErrorTranslator: Send + Sync + 'static {
    /// Translate a structured error into an [`ApiError`].
    fn translate(&self, status: u16, payload: &ErrorPayload) -> ApiError;
}

/// Translator for the default code table in [`codes`].
///
/// Known codes win over the status; unknown or missing codes fall back on
/// the status code.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceErrorTranslator;

impl ServiceErrorTranslator {
    /// Kind for a code in the default table.
    #[must_use]
    pub const fn kind_for_code(code: u32) -> Option<ServiceErrorKind> {
        let kind = match code {
            codes::INVALID_PARAMETER => ServiceErrorKind::InvalidParameter,
            codes::MISSING_PARAMETER => ServiceErrorKind::MissingParameter,
            codes::ALREADY_EXISTS => ServiceErrorKind::AlreadyExists,
            codes::NOT_GROUP_MEMBER => ServiceErrorKind::NotGroupMember,
            codes::MESSAGE_TOO_LONG => ServiceErrorKind::MessageTooLong,
            _ => return None,
        };
        Some(kind)
    }

    /// Kind for a status code when no known error code applies.
    #[must_use]
    pub const fn kind_for_status(status: u16) -> ServiceErrorKind {
        match status {
            400 => ServiceErrorKind::BadRequest,
            404 => ServiceErrorKind::NotFound,
            409 => ServiceErrorKind::Conflict,
            413 => ServiceErrorKind::PayloadTooLarge,
            422 => ServiceErrorKind::Unprocessable,
            _ => ServiceErrorKind::Other,
        }
    }
}

impl ErrorTranslator for ServiceErrorTranslator {
    fn translate(&self, status: u16, payload: &ErrorPayload) -> ApiError {
        let kind = payload
            .code
            .and_then(Self::kind_for_code)
            .unwrap_or_else(|| Self::kind_for_status(status));

        let message = payload
            .message()
            .map_or_else(|| kind.to_string(), ToString::to_string);

        ApiError::Service(ServiceError {
            kind,
            status,
            code: payload.code,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    fn payload(code: Option<u32>, message: Option<&str>) -> ErrorPayload {
        ErrorPayload {
            code,
            message: message.map(ToString::to_string),
            stat: Some("fail".to_string()),
        }
    }

    #[test]
    fn known_code_wins_over_status() {
        let err = ServiceErrorTranslator.translate(
            400,
            &payload(Some(codes::MESSAGE_TOO_LONG), Some("Body is too long")),
        );

        let_assert!(ApiError::Service(service) = err);
        check!(service.kind == ServiceErrorKind::MessageTooLong);
        check!(service.status == 400);
        check!(service.code == Some(33));
        check!(service.message == "Body is too long");
    }

    #[test]
    fn unknown_code_falls_back_on_status() {
        let err = ServiceErrorTranslator.translate(404, &payload(Some(9_999), Some("gone")));
        check!(err.service_kind() == Some(ServiceErrorKind::NotFound));
    }

    #[test]
    fn missing_message_uses_kind_description() {
        let err = ServiceErrorTranslator.translate(409, &payload(Some(codes::ALREADY_EXISTS), None));
        let_assert!(ApiError::Service(service) = err);
        check!(service.kind == ServiceErrorKind::AlreadyExists);
        check!(service.message == "already exists");
    }

    #[test]
    fn status_table() {
        check!(ServiceErrorTranslator::kind_for_status(400) == ServiceErrorKind::BadRequest);
        check!(ServiceErrorTranslator::kind_for_status(413) == ServiceErrorKind::PayloadTooLarge);
        check!(ServiceErrorTranslator::kind_for_status(422) == ServiceErrorKind::Unprocessable);
        check!(ServiceErrorTranslator::kind_for_status(418) == ServiceErrorKind::Other);
        check!(ServiceErrorTranslator::kind_for_code(0).is_none());
    }

    #[test]
    fn default_code_table_is_closed() {
        let known: Vec<u32> = (0..=100)
            .filter(|code| ServiceErrorTranslator::kind_for_code(*code).is_some())
            .collect();
        check!(known == [1, 2, 17, 22, 33]);
    }

    #[test]
    fn translation_is_deterministic() {
        let input = payload(Some(codes::NOT_GROUP_MEMBER), Some("Join the group first"));
        let first = ServiceErrorTranslator.translate(400, &input);
        let second = ServiceErrorTranslator.translate(400, &input);
        check!(first == second);
    }
}
