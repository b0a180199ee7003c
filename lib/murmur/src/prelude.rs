//! Prelude module for convenient imports.
//!
//! ```ignore
//! use murmur::prelude::*;
//! ```

pub use crate::{
    ApiClient, ApiError, ApiResult, Classification, ClientConfig, Error, ErrorTranslator,
    HttpClient, HttpClientExt, HyperClient, Method, Request, Response, ResponseClassifier, Result,
    ServiceErrorKind, StatusCode,
};
pub use serde::{Deserialize, Serialize};
