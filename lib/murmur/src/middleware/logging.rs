//! Request/response logging with `tracing`.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use murmur_core::FastPath;
use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{Error, Request, Response, Result};

/// Verbosity of [`LoggingLayer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Also log request headers.
    Debug,
    /// Method, URL, status and timing only.
    #[default]
    Info,
}

/// Layer that logs every exchange.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

impl LoggingLayer {
    /// Info-level logging.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Debug-level logging, with request headers.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }

    /// Configured verbosity.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service produced by [`LoggingLayer`].
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

/// How a completed exchange is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// Non-error status.
    Completed,
    /// Error status resolved by a status rule, body unused.
    Rule(FastPath),
    /// Error status whose body goes through classification.
    Classified,
}

impl Outcome {
    fn of(status: u16) -> Self {
        if !murmur_core::has_error(status) {
            return Self::Completed;
        }
        FastPath::first_match(status).map_or(Self::Classified, Self::Rule)
    }
}

fn log_response(response: &Response<Bytes>, elapsed_ms: u64) {
    let status = response.status();
    match Outcome::of(status) {
        Outcome::Completed => info!(status, elapsed_ms, "request completed"),
        Outcome::Rule(rule) => warn!(status, ?rule, elapsed_ms, "request failed"),
        Outcome::Classified => info!(
            status,
            elapsed_ms,
            body_len = response.body().len(),
            "error status, body will be classified"
        ),
    }
}

impl<S> Service<Request<Bytes>> for Logging<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let method = request.method();
        let url = request.url().to_string();
        let span = span!(Level::INFO, "api_request", %method, %url);

        if self.level == LogLevel::Debug {
            debug!(parent: &span, headers = ?request.headers(), "sending request");
        } else {
            info!(parent: &span, "sending request");
        }

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();
                let result = inner.call(request).await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) => log_response(response, elapsed_ms),
                    Err(err) => warn!(error = %err, elapsed_ms, "request failed without response"),
                }

                result
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_layer_levels() {
        assert_eq!(LoggingLayer::new().level(), LogLevel::Info);
        assert_eq!(LoggingLayer::debug().level(), LogLevel::Debug);
    }

    #[test]
    fn success_and_redirect_are_completed() {
        assert_eq!(Outcome::of(200), Outcome::Completed);
        assert_eq!(Outcome::of(204), Outcome::Completed);
        assert_eq!(Outcome::of(302), Outcome::Completed);
    }

    #[test]
    fn error_statuses_are_tagged_with_their_rule() {
        assert_eq!(Outcome::of(500), Outcome::Rule(FastPath::ServerError));
        assert_eq!(Outcome::of(429), Outcome::Rule(FastPath::RateLimitExceeded));
        assert_eq!(Outcome::of(503), Outcome::Rule(FastPath::ConnectionFailure));
        assert_eq!(Outcome::of(408), Outcome::Rule(FastPath::ConnectionFailure));
        assert_eq!(Outcome::of(401), Outcome::Rule(FastPath::Unauthorized));
        assert_eq!(Outcome::of(403), Outcome::Rule(FastPath::Forbidden));
    }

    #[test]
    fn other_error_statuses_are_classified() {
        assert_eq!(Outcome::of(400), Outcome::Classified);
        assert_eq!(Outcome::of(404), Outcome::Classified);
        assert_eq!(Outcome::of(502), Outcome::Classified);
    }
}
