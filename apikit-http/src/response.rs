//! The transport-side view of an HTTP response.
//!
//! This crate never issues requests; it inspects responses produced by some
//! HTTP stack. [`HttpResponse`] is the seam: anything that can report status,
//! headers and a body stream can be classified, snapshotted and decoded.
//!
//! Implementations are provided for [`BufferedResponse`] (an in-memory
//! response) and, with the `client` feature, for [`reqwest::Response`].

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use http::header::CONTENT_LENGTH;
use http::{StatusCode, Version};

use crate::constants::is_content_header;
use crate::headers::{HeaderIter, HeaderList, header_map_iter};

/// A boxed, `Send` future, as returned by [`HttpResponse::next_chunk`].
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// An opaque failure reported by the transport while reading a body.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// A completed HTTP response, as produced by an external transport.
///
/// The response owns (or borrows) the body stream; this crate reads it at
/// most once, to completion, via [`HttpResponse::next_chunk`].
pub trait HttpResponse: Send {
    /// The status code.
    fn status(&self) -> StatusCode;

    /// The reason phrase sent with the status, if known.
    fn reason(&self) -> Option<&str>;

    /// The protocol version, if known.
    fn version(&self) -> Option<Version>;

    /// The response headers, excluding content headers.
    fn headers(&self) -> HeaderIter<'_>;

    /// The headers describing the content (`Content-Type`, `Content-Length`, ...).
    fn content_headers(&self) -> HeaderIter<'_>;

    /// The declared length of the body, taken from `Content-Length` by default.
    fn content_length(&self) -> Option<u64> {
        self.content_headers()
            .find(|(name, _)| name.eq_ignore_ascii_case(CONTENT_LENGTH.as_str()))
            .and_then(|(_, value)| std::str::from_utf8(value).ok())
            .and_then(|value| value.trim().parse().ok())
    }

    /// The method of the request that produced this response, if known.
    fn request_method(&self) -> Option<&str> {
        None
    }

    /// The URI of the request that produced this response, if known.
    fn request_uri(&self) -> Option<&str> {
        None
    }

    /// The headers of the request that produced this response, if known.
    fn request_headers(&self) -> Option<HeaderIter<'_>> {
        None
    }

    /// Reads the next chunk of the body; `Ok(None)` marks its end.
    fn next_chunk(&mut self) -> BoxFuture<'_, Result<Option<Bytes>, TransportError>>;
}

/// The request side of a [`BufferedResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// The request method.
    pub method: Option<String>,
    /// The request URI.
    pub uri: String,
    /// The request headers.
    pub headers: HeaderList,
}

impl RequestContext {
    /// Creates a context for a request to `uri`.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    /// Sets the request method.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Adds a request header, without validation.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.headers.append_unchecked(name, value);
        self
    }
}

/// An in-memory [`HttpResponse`].
///
/// Useful for responses that were buffered elsewhere, for replaying captured
/// traffic, and in tests. Header values are stored unvalidated, so malformed
/// headers can be represented faithfully.
///
/// # Example
///
/// ```rust
/// use apikit_http::{BufferedResponse, HttpResponse};
/// use http::StatusCode;
///
/// let response = BufferedResponse::new(StatusCode::NOT_FOUND)
///     .with_reason("Not Found")
///     .with_content_header("Content-Type", "text/plain; charset=utf-8")
///     .with_body("no such thing");
/// assert_eq!(response.status(), StatusCode::NOT_FOUND);
/// assert_eq!(response.content_length(), None);
/// ```
#[derive(Debug, Clone)]
pub struct BufferedResponse {
    status: StatusCode,
    reason: Option<String>,
    version: Option<Version>,
    headers: HeaderList,
    content_headers: HeaderList,
    body: VecDeque<Bytes>,
    request: Option<RequestContext>,
}

impl BufferedResponse {
    /// Creates a response with the given status, no headers and an empty body.
    #[must_use]
    pub const fn new(status: StatusCode) -> Self {
        Self {
            status,
            reason: None,
            version: None,
            headers: HeaderList::new(),
            content_headers: HeaderList::new(),
            body: VecDeque::new(),
            request: None,
        }
    }

    /// Sets the reason phrase.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Sets the protocol version.
    #[must_use]
    pub const fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Adds a response header, without validation.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.headers.append_unchecked(name, value);
        self
    }

    /// Adds a content header, without validation.
    #[must_use]
    pub fn with_content_header(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.content_headers.append_unchecked(name, value);
        self
    }

    /// Replaces the body with a single chunk.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = VecDeque::from([body.into()]);
        self
    }

    /// Replaces the body with a sequence of chunks, delivered one at a time.
    #[must_use]
    pub fn with_chunks<I, B>(mut self, chunks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        self.body = chunks.into_iter().map(Into::into).collect();
        self
    }

    /// Attaches the originating request.
    #[must_use]
    pub fn with_request(mut self, request: RequestContext) -> Self {
        self.request = Some(request);
        self
    }

    /// Mutable access to the response headers.
    pub const fn headers_mut(&mut self) -> &mut HeaderList {
        &mut self.headers
    }

    /// Mutable access to the content headers.
    pub const fn content_headers_mut(&mut self) -> &mut HeaderList {
        &mut self.content_headers
    }

    /// Mutable access to the originating request, if one is attached.
    pub const fn request_mut(&mut self) -> Option<&mut RequestContext> {
        self.request.as_mut()
    }
}

impl<B: Into<Bytes>> From<http::Response<B>> for BufferedResponse {
    fn from(response: http::Response<B>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            status: parts.status,
            reason: parts.status.canonical_reason().map(str::to_owned),
            version: Some(parts.version),
            headers: HeaderList::copy_from(header_map_iter(&parts.headers, |name| {
                !is_content_header(name)
            })),
            content_headers: HeaderList::copy_from(header_map_iter(&parts.headers, is_content_header)),
            body: VecDeque::from([body.into()]),
            request: None,
        }
    }
}

impl HttpResponse for BufferedResponse {
    fn status(&self) -> StatusCode {
        self.status
    }

    fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    fn version(&self) -> Option<Version> {
        self.version
    }

    fn headers(&self) -> HeaderIter<'_> {
        self.headers.pairs()
    }

    fn content_headers(&self) -> HeaderIter<'_> {
        self.content_headers.pairs()
    }

    fn request_method(&self) -> Option<&str> {
        self.request.as_ref()?.method.as_deref()
    }

    fn request_uri(&self) -> Option<&str> {
        self.request.as_ref().map(|request| request.uri.as_str())
    }

    fn request_headers(&self) -> Option<HeaderIter<'_>> {
        self.request.as_ref().map(|request| request.headers.pairs())
    }

    fn next_chunk(&mut self) -> BoxFuture<'_, Result<Option<Bytes>, TransportError>> {
        let chunk = self.body.pop_front();
        Box::pin(async move { Ok::<_, TransportError>(chunk) })
    }
}
