//! Tower middleware for the murmur transport.
//!
//! Layers wrap the hyper transport inside [`crate::HyperClient`]; add them with
//! [`crate::HyperClientBuilder::layer`] or the `with_*` helpers.
//!
//! - [`LoggingLayer`] - logs each exchange with `tracing`, tagging error
//!   statuses with the classification rule they will hit
//!
//! ```ignore
//! use murmur::HyperClient;
//! use murmur::middleware::LoggingLayer;
//!
//! let client = HyperClient::builder()
//!     .layer(LoggingLayer::debug())
//!     .build();
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

pub use tower::{Layer, ServiceBuilder};
