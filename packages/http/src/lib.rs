//! # alvincora-http
//!
//! HTTP collaborator for the outbound conversion path.
//!
//! Converters never talk to `reqwest` directly. They hold an
//! `HttpExecutor`, which in production is a `ReqwestExecutor` with a request
//! timeout and in tests a `MockExecutor` that records every request it sees.
//!
//! ```ignore
//! use alvincora_http::{HttpExecutor, HttpRequest, ReqwestExecutor};
//!
//! let executor = ReqwestExecutor::with_default_timeout()?;
//! let response = executor.execute(&HttpRequest::get(
//!     "http://fedora:8080/fedora/objects/alvin-place:22/datastreams/METADATA/content",
//! ))?;
//! assert!(response.is_success());
//! ```

pub mod error;
pub mod executor;
pub mod types;

pub use error::Error;
pub use executor::{HttpExecutor, ReqwestExecutor};
pub use types::{HttpRequest, HttpResponse};

#[cfg(any(test, feature = "test-utils"))]
pub use executor::mock;
