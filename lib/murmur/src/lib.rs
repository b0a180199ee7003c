//! Async client for a social-network REST API.
//!
//! Every call resolves to the response or to one typed [`ApiError`], so
//! calling code can branch on rate limiting, credential problems and the
//! service's own error codes without looking at raw HTTP.
//!
//! # Example
//!
//! ```ignore
//! use murmur::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct User {
//!     id: u64,
//!     full_name: String,
//! }
//!
//! let http = HyperClient::builder().with_logging().build();
//! let api = ApiClient::new(http, "https://api.example.com/api/v1/")?;
//!
//! match api.get_json::<User>("users/current.json").await {
//!     Ok(user) => println!("hello {}", user.full_name),
//!     Err(ApiError::Unauthorized { message, .. }) => eprintln!("login again: {message}"),
//!     Err(err) if err.is_retryable() => eprintln!("try later: {err}"),
//!     Err(err) => return Err(err.into()),
//! }
//! ```

mod api_client;
mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;

pub use api_client::ApiClient;
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_USER_AGENT};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use murmur_core::{
    ApiError, ApiResult, ClassifiableResponse, Classification, ContentType, Error, ErrorPayload,
    ErrorTranslator, FastPath, HttpClient, HttpClientExt, Method, Request, RequestBuilder,
    Response, ResponseClassifier, Result, ServiceError, ServiceErrorKind, ServiceErrorTranslator,
    codes, deserialize_payload, from_json, has_error, to_json,
};

// Re-export http types for status codes and headers
pub use murmur_core::{StatusCode, header};

#[cfg(feature = "streaming")]
pub use murmur_core::{StreamingBody, StreamingResponse};

pub use url;
