//! Prelude module for convenient imports.
//!
//! ```ignore
//! use murmur_core::prelude::*;
//! ```

pub use crate::{
    ApiError, ApiResult, Classification, Error, ErrorPayload, ErrorTranslator, HttpClient,
    HttpClientExt, Method, Request, RequestBuilder, Response, ResponseClassifier, Result,
    ServiceError, ServiceErrorKind, ServiceErrorTranslator, StatusCode,
};
