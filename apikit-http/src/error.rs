//! Error types for response checking and body decoding.
//!
//! [`HttpError`] is the snapshot taken of an unsuccessful response; [`Error`]
//! is what every fallible operation in this crate returns.

use std::borrow::Cow;
use std::fmt;

use http::{StatusCode, Version};

use crate::headers::HeaderList;
use crate::response::TransportError;
use crate::status::{status_name, version_number};

/// Errors returned by the operations of this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The response status was outside the successful (2xx) range.
    #[error(transparent)]
    Http(Box<HttpError>),

    /// The operation was cancelled before it completed.
    #[error("operation cancelled")]
    Cancelled,

    /// The body could not be decoded to text.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The transport failed while the body was being read.
    #[error("failed to read response body: {0}")]
    Transport(#[source] TransportError),

    /// A blocking call could not run: it was made from a current-thread
    /// runtime, or its worker could not be started.
    #[error("blocking call failed: {0}")]
    Runtime(#[source] std::io::Error),
}

impl From<HttpError> for Error {
    fn from(error: HttpError) -> Self {
        Self::Http(Box::new(error))
    }
}

impl Error {
    /// Returns `true` for [`Error::Http`].
    #[must_use]
    pub const fn is_http(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// Returns `true` for [`Error::Cancelled`].
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns the response snapshot if this is an [`Error::Http`].
    #[must_use]
    pub fn http_error(&self) -> Option<&HttpError> {
        match self {
            Self::Http(error) => Some(&**error),
            _ => None,
        }
    }

    /// Converts into the response snapshot if this is an [`Error::Http`].
    #[must_use]
    pub fn into_http_error(self) -> Option<HttpError> {
        match self {
            Self::Http(error) => Some(*error),
            _ => None,
        }
    }

    /// Returns the response status if this is an [`Error::Http`].
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.http_error().map(HttpError::status)
    }
}

/// Failure to turn a body into text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The character set named by the headers is not a known encoding.
    #[error("unknown character encoding '{0}'")]
    UnknownEncoding(String),

    /// The body contains byte sequences that are invalid in its encoding.
    #[error("response body is not valid {encoding}")]
    Malformed {
        /// Canonical name of the encoding used.
        encoding: &'static str,
    },
}

/// An error reported by an HTTP response.
///
/// This is a snapshot: every field is an owned copy taken while the response
/// was still readable, so the error stays fully inspectable after the response
/// (and its connection) are gone. Header copies are made without validation
/// and keep malformed values as received.
///
/// The [message](HttpError::message) has the form
/// `HTTP[/<version>] <code> (<name>)[ '<reason>']`, where `<name>` comes from
/// [`status_name`]:
///
/// ```rust
/// use apikit_http::HttpError;
/// use http::{StatusCode, Version};
///
/// let error = HttpError::new(StatusCode::NOT_FOUND, Some("Not Found".into()))
///     .with_version(Version::HTTP_11);
/// assert_eq!(error.to_string(), "HTTP/1.1 404 (NotFound) 'Not Found'");
///
/// let error = HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, None);
/// assert_eq!(error.to_string(), "HTTP 500 (InternalServerError)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    pub(crate) status: StatusCode,
    pub(crate) reason: Option<String>,
    pub(crate) version: Option<Version>,
    pub(crate) content: Option<String>,
    pub(crate) content_headers: Option<HeaderList>,
    pub(crate) response_headers: Option<HeaderList>,
    pub(crate) request_method: Option<String>,
    pub(crate) request_uri: Option<String>,
    pub(crate) request_headers: Option<HeaderList>,
    pub(crate) message: Option<String>,
}

impl HttpError {
    /// Creates an error from a status code and reason phrase alone.
    ///
    /// Use [`Inspector::error_snapshot`](crate::Inspector::error_snapshot) to
    /// capture everything a response has to offer instead.
    #[must_use]
    pub const fn new(status: StatusCode, reason: Option<String>) -> Self {
        Self {
            status,
            reason,
            version: None,
            content: None,
            content_headers: None,
            response_headers: None,
            request_method: None,
            request_uri: None,
            request_headers: None,
            message: None,
        }
    }

    /// Sets the protocol version.
    #[must_use]
    pub const fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Sets the body text.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Replaces the synthesized message with an explicit one.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The status code of the response.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// The reason phrase of the response, if one was sent.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// The protocol version of the response, if known.
    #[must_use]
    pub const fn version(&self) -> Option<Version> {
        self.version
    }

    /// The body of the response, decoded as text.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// A copy of the response's content headers.
    #[must_use]
    pub const fn content_headers(&self) -> Option<&HeaderList> {
        self.content_headers.as_ref()
    }

    /// A copy of the response headers (excluding content headers).
    #[must_use]
    pub const fn response_headers(&self) -> Option<&HeaderList> {
        self.response_headers.as_ref()
    }

    /// The method of the originating request, if known.
    #[must_use]
    pub fn request_method(&self) -> Option<&str> {
        self.request_method.as_deref()
    }

    /// The URI of the originating request, if known.
    #[must_use]
    pub fn request_uri(&self) -> Option<&str> {
        self.request_uri.as_deref()
    }

    /// A copy of the originating request's headers, if known.
    #[must_use]
    pub const fn request_headers(&self) -> Option<&HeaderList> {
        self.request_headers.as_ref()
    }

    /// A textual representation of the error.
    ///
    /// This is the message set with [`HttpError::with_message`] if there is
    /// one, and otherwise synthesized from the status, version and reason.
    #[must_use]
    pub fn message(&self) -> Cow<'_, str> {
        if let Some(message) = &self.message {
            return Cow::Borrowed(message);
        }
        let version = self
            .version
            .map_or_else(String::new, |version| format!("/{}", version_number(version)));
        let reason = self
            .reason
            .as_ref()
            .map_or_else(String::new, |reason| format!(" '{reason}'"));
        Cow::Owned(format!(
            "HTTP{version} {} ({}){reason}",
            self.status.as_u16(),
            status_name(self.status)
        ))
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for HttpError {}
