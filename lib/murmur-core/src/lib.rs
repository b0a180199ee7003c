//! Core types for the murmur social API client.
//!
//! The heart of this crate is the response classification pipeline:
//! - [`ResponseClassifier`] - turns a finished HTTP exchange into a [`Classification`]
//! - [`FastPath`] - the ordered status-code rules resolved without parsing the body
//! - [`ErrorPayload`] and [`deserialize_payload`] - the service's structured error body
//! - [`ErrorTranslator`] and [`ServiceErrorTranslator`] - service error codes to [`ApiError`]
//!
//! Around it sit the transport types the classifier consumes:
//! - [`Method`], [`Request`] and [`RequestBuilder`] - outgoing requests
//! - [`Response`] - buffered HTTP response
//! - [`HttpClient`] and [`HttpClientExt`] - the transport seam
//! - [`Error`] and [`Result`] - transport errors

mod api_error;
mod body;
mod classify;
mod client;
mod error;
mod method;
mod payload;
pub mod prelude;
mod request;
mod response;
mod translate;

pub use api_error::{ApiError, ApiResult, Classification, ServiceError, ServiceErrorKind};
pub use body::{ContentType, from_json, to_json};
pub use classify::{ClassifiableResponse, FastPath, ResponseClassifier, has_error};
pub use client::{HttpClient, HttpClientExt};
pub use error::{Error, Result};
pub use method::Method;
pub use payload::{ErrorPayload, deserialize_payload};
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use translate::{ErrorTranslator, ServiceErrorTranslator, codes};

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};

#[cfg(feature = "streaming")]
pub use response::streaming::{StreamingBody, StreamingResponse};
