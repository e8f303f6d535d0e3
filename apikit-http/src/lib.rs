//! Turning unsuccessful HTTP responses into rich, self-contained errors.
//!
//! A web-service client usually wants one thing from a response it did not
//! expect: an error value that says what went wrong, detailed enough to
//! diagnose the problem after the response itself is gone. This crate
//! provides that error ([`HttpError`]) along with the pieces that produce it:
//!
//! - [`ensure_successful`] passes 2xx responses through untouched and turns
//!   anything else into an [`Error::Http`] carrying a full snapshot.
//! - [`error_snapshot`] captures status, reason, version, headers, the
//!   decoded body and (when known) the originating request.
//! - [`decode_body`] reads a body to completion and decodes it using the
//!   character set the response declares.
//!
//! Each operation has a `_blocking` twin and honours a
//! [`CancellationToken`](tokio_util::sync::CancellationToken). An
//! [`Inspector`] bundles the configurable parts (diagnostic tracing and the
//! fallback character set); the free functions use a default one.
//!
//! Responses are consumed through the [`HttpResponse`] trait, implemented for
//! [`BufferedResponse`] and, with the `client` feature, `reqwest::Response`.
//!
//! # Modules
//!
//! - [`constants`]: default character set and content header names
//! - [`encoding`]: character set detection and strict decoding
//! - [`error`]: [`Error`], [`HttpError`] and [`DecodeError`]
//! - [`headers`]: the unvalidated [`HeaderList`]
//! - [`response`]: the [`HttpResponse`] seam and [`BufferedResponse`]
//! - [`status`]: status names and version numbers used in messages
//! - [`trace`]: [`BodyTrace`] hooks around body reads
//! - [`user_agent`]: [`UserAgent`] product tokens
//! - `client`: [`HttpResponse`] for `reqwest::Response` (feature: `client`)
//!
//! # Example
//!
//! ```rust
//! use apikit_http::{BufferedResponse, ensure_successful};
//! use http::StatusCode;
//! use tokio_util::sync::CancellationToken;
//!
//! # tokio_test_block_on(async {
//! let response = BufferedResponse::new(StatusCode::TOO_MANY_REQUESTS)
//!     .with_reason("Too Many Requests")
//!     .with_content_header("Content-Type", "text/plain")
//!     .with_body("slow down");
//! let err = ensure_successful(response, &CancellationToken::new()).await.unwrap_err();
//! assert_eq!(err.to_string(), "HTTP 429 (TooManyRequests) 'Too Many Requests'");
//! assert_eq!(err.http_error().unwrap().content(), Some("slow down"));
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod constants;
pub mod encoding;
pub mod error;
pub mod headers;
mod inspector;
pub mod response;
pub mod status;
pub mod trace;
pub mod user_agent;

#[cfg(feature = "client")]
mod client;

pub use encoding::{Charset, content_encoding, content_encoding_or};
pub use error::{DecodeError, Error, HttpError};
pub use headers::{HeaderIter, HeaderList};
pub use inspector::Inspector;
pub use response::{BoxFuture, BufferedResponse, HttpResponse, RequestContext, TransportError};
pub use status::{status_name, version_number};
pub use trace::{BodyTrace, NoTrace};
#[cfg(feature = "telemetry")]
pub use trace::TracingTrace;
pub use user_agent::UserAgent;

use tokio_util::sync::CancellationToken;

/// Checks that a response has a successful (2xx) status.
///
/// See [`Inspector::ensure_successful`].
///
/// # Errors
///
/// See [`Inspector::ensure_successful`].
pub async fn ensure_successful<R: HttpResponse>(response: R, cancel: &CancellationToken) -> Result<R, Error> {
    Inspector::default().ensure_successful(response, cancel).await
}

/// Blocking version of [`ensure_successful`].
///
/// # Errors
///
/// See [`Inspector::ensure_successful_blocking`].
pub fn ensure_successful_blocking<R: HttpResponse>(response: R, cancel: &CancellationToken) -> Result<R, Error> {
    Inspector::default().ensure_successful_blocking(response, cancel)
}

/// Takes an [`HttpError`] snapshot of a response.
///
/// # Errors
///
/// See [`Inspector::error_snapshot`].
pub async fn error_snapshot<R: HttpResponse + ?Sized>(
    response: &mut R,
    cancel: &CancellationToken,
) -> Result<HttpError, Error> {
    Inspector::default().error_snapshot(response, cancel).await
}

/// Blocking version of [`error_snapshot`].
///
/// # Errors
///
/// See [`Inspector::error_snapshot_blocking`].
pub fn error_snapshot_blocking<R: HttpResponse + ?Sized>(
    response: &mut R,
    cancel: &CancellationToken,
) -> Result<HttpError, Error> {
    Inspector::default().error_snapshot_blocking(response, cancel)
}

/// Reads a response body to completion and decodes it as text.
///
/// # Errors
///
/// See [`Inspector::decode_body`].
pub async fn decode_body<R: HttpResponse + ?Sized>(response: &mut R, cancel: &CancellationToken) -> Result<String, Error> {
    Inspector::default().decode_body(response, cancel).await
}

/// Blocking version of [`decode_body`].
///
/// # Errors
///
/// See [`Inspector::decode_body_blocking`].
pub fn decode_body_blocking<R: HttpResponse + ?Sized>(
    response: &mut R,
    cancel: &CancellationToken,
) -> Result<String, Error> {
    Inspector::default().decode_body_blocking(response, cancel)
}
