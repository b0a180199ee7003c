//! HTTP methods used by the social API.

use derive_more::Display;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// List or fetch users, groups, messages and topics.
    #[display("GET")]
    Get,
    /// Post messages, create groups.
    #[display("POST")]
    Post,
    /// Delete messages, leave groups.
    #[display("DELETE")]
    Delete,
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Delete => Self::DELETE,
        }
    }
}

impl TryFrom<http::Method> for Method {
    type Error = crate::Error;

    fn try_from(method: http::Method) -> Result<Self, Self::Error> {
        match method {
            http::Method::GET => Ok(Self::Get),
            http::Method::POST => Ok(Self::Post),
            http::Method::DELETE => Ok(Self::Delete),
            other => Err(crate::Error::invalid_request(format!(
                "unsupported HTTP method: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_round_trips_through_http() {
        for method in [Method::Get, Method::Post, Method::Delete] {
            let converted = Method::try_from(http::Method::from(method)).expect("supported");
            assert_eq!(converted, method);
            assert_eq!(http::Method::from(method).as_str(), method.to_string());
        }
    }

    #[test]
    fn unsupported_method() {
        let err = Method::try_from(http::Method::PATCH).expect_err("unsupported");
        assert_eq!(err.to_string(), "invalid request: unsupported HTTP method: PATCH");
    }

    #[test]
    fn put_is_not_part_of_the_api() {
        let err = Method::try_from(http::Method::PUT).expect_err("unsupported");
        assert_eq!(err.to_string(), "invalid request: unsupported HTTP method: PUT");
    }
}
