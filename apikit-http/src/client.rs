//! [`HttpResponse`] for [`reqwest::Response`].
//!
//! `reqwest` keeps a single header map, which is split into content and
//! response headers by name (see
//! [`CONTENT_HEADER_NAMES`](crate::constants::CONTENT_HEADER_NAMES)). The
//! reason phrase reported is the canonical one for the status, and the
//! request URI is the final URL (after redirects). `reqwest` does not retain
//! the request method or headers, so those are absent.

use bytes::Bytes;
use http::{StatusCode, Version};

use crate::constants::is_content_header;
use crate::headers::{HeaderIter, header_map_iter};
use crate::response::{BoxFuture, HttpResponse, TransportError};

impl HttpResponse for reqwest::Response {
    fn status(&self) -> StatusCode {
        Self::status(self)
    }

    fn reason(&self) -> Option<&str> {
        Self::status(self).canonical_reason()
    }

    fn version(&self) -> Option<Version> {
        Some(Self::version(self))
    }

    fn headers(&self) -> HeaderIter<'_> {
        header_map_iter(Self::headers(self), |name| !is_content_header(name))
    }

    fn content_headers(&self) -> HeaderIter<'_> {
        header_map_iter(Self::headers(self), is_content_header)
    }

    fn request_uri(&self) -> Option<&str> {
        Some(self.url().as_str())
    }

    fn next_chunk(&mut self) -> BoxFuture<'_, Result<Option<Bytes>, TransportError>> {
        Box::pin(async move { self.chunk().await.map_err(TransportError::from) })
    }
}
