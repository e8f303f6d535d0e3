//! Response classification, error snapshots and body decoding.
//!
//! [`Inspector`] carries the pieces of configuration these operations share
//! (the [`BodyTrace`] to report to and the fallback character set). Each
//! operation comes as an async method, which can be cancelled through a
//! [`CancellationToken`], and as a `_blocking` twin that runs the very same
//! future to completion via [`apikit::block_on`].
//!
//! The free functions at the crate root use [`Inspector::default`].

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::constants::DEFAULT_CHARSET;
use crate::encoding::{content_encoding_or, decode_with, lookup};
use crate::error::{Error, HttpError};
use crate::headers::HeaderList;
use crate::response::HttpResponse;
use crate::status::is_success;
use crate::trace::{BodyTrace, NoTrace};

/// Inspects responses: checks their status, snapshots failures and decodes bodies.
///
/// # Example
///
/// ```rust
/// use apikit_http::{BufferedResponse, Inspector};
/// use http::StatusCode;
/// use tokio_util::sync::CancellationToken;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let inspector = Inspector::new();
/// let response = BufferedResponse::new(StatusCode::SERVICE_UNAVAILABLE).with_body("try later");
///
/// let err = inspector
///     .ensure_successful(response, &CancellationToken::new())
///     .await
///     .unwrap_err();
/// let snapshot = err.http_error().unwrap();
/// assert_eq!(snapshot.content(), Some("try later"));
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct Inspector {
    trace: Arc<dyn BodyTrace>,
    fallback_encoding: String,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new()
    }
}

impl Inspector {
    /// Creates an inspector that traces nothing and falls back to `utf-8`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trace: Arc::new(NoTrace),
            fallback_encoding: DEFAULT_CHARSET.to_owned(),
        }
    }

    /// Sets the [`BodyTrace`] that is told about body reads.
    #[must_use]
    pub fn with_trace(mut self, trace: impl BodyTrace + 'static) -> Self {
        self.trace = Arc::new(trace);
        self
    }

    /// Reports body reads through `tracing` (see [`crate::trace::TracingTrace`]).
    #[cfg(feature = "telemetry")]
    #[must_use]
    pub fn with_tracing(self) -> Self {
        self.with_trace(crate::trace::TracingTrace)
    }

    /// Sets the character set used when the headers do not specify one.
    #[must_use]
    pub fn with_fallback_encoding(mut self, name: impl Into<String>) -> Self {
        self.fallback_encoding = name.into();
        self
    }

    /// Returns the fallback character set.
    #[must_use]
    pub fn fallback_encoding(&self) -> &str {
        &self.fallback_encoding
    }

    /// Checks that a response has a successful (2xx) status.
    ///
    /// A successful response is returned untouched; its body is not read.
    /// Otherwise an [`HttpError`] snapshot is taken (reading the entire body),
    /// the response is dropped, and the snapshot is returned as
    /// [`Error::Http`].
    ///
    /// # Errors
    ///
    /// - [`Error::Http`] if the status is not successful.
    /// - [`Error::Cancelled`] if `cancel` fires before the snapshot is complete.
    /// - [`Error::Decode`] or [`Error::Transport`] if the body of an
    ///   unsuccessful response cannot be read; these take precedence over the
    ///   status.
    pub async fn ensure_successful<R: HttpResponse>(
        &self,
        mut response: R,
        cancel: &CancellationToken,
    ) -> Result<R, Error> {
        if is_success(response.status()) {
            return Ok(response);
        }
        let error = self.error_snapshot(&mut response, cancel).await?;
        drop(response);
        #[cfg(feature = "telemetry")]
        tracing::debug!(
            status = error.status().as_u16(),
            uri = error.request_uri().unwrap_or_default(),
            "response check failed: {error}"
        );
        Err(error.into())
    }

    /// Blocking version of [`Inspector::ensure_successful`].
    ///
    /// # Errors
    ///
    /// As [`Inspector::ensure_successful`], plus [`Error::Runtime`] if
    /// called from a current-thread tokio runtime or if the blocking executor
    /// cannot be started (see [`apikit::block_on`]).
    pub fn ensure_successful_blocking<R: HttpResponse>(
        &self,
        response: R,
        cancel: &CancellationToken,
    ) -> Result<R, Error> {
        apikit::block_on(self.ensure_successful(response, cancel)).map_err(Error::Runtime)?
    }

    /// Takes an [`HttpError`] snapshot of a response, whatever its status.
    ///
    /// The body is read to completion and decoded; the headers (and the
    /// originating request's URI and headers, if the transport provides them)
    /// are copied. The result shares no storage with `response`.
    ///
    /// # Errors
    ///
    /// - [`Error::Cancelled`] if `cancel` fires before the body has been read;
    ///   nothing captured so far is returned.
    /// - [`Error::Decode`] if the body cannot be decoded.
    /// - [`Error::Transport`] if reading the body fails.
    pub async fn error_snapshot<R: HttpResponse + ?Sized>(
        &self,
        response: &mut R,
        cancel: &CancellationToken,
    ) -> Result<HttpError, Error> {
        let content_headers = HeaderList::copy_from(response.content_headers());
        let response_headers = HeaderList::copy_from(response.headers());
        let request_headers = response.request_headers().map(HeaderList::copy_from);
        let content = self.read_text(response, &content_headers, cancel).await?;
        Ok(HttpError {
            status: response.status(),
            reason: response.reason().map(str::to_owned),
            version: response.version(),
            content: Some(content),
            content_headers: Some(content_headers),
            response_headers: Some(response_headers),
            request_method: response.request_method().map(str::to_owned),
            request_uri: response.request_uri().map(str::to_owned),
            request_headers,
            message: None,
        })
    }

    /// Blocking version of [`Inspector::error_snapshot`].
    ///
    /// # Errors
    ///
    /// As [`Inspector::error_snapshot`], plus [`Error::Runtime`] if
    /// called from a current-thread tokio runtime or if the blocking executor
    /// cannot be started (see [`apikit::block_on`]).
    pub fn error_snapshot_blocking<R: HttpResponse + ?Sized>(
        &self,
        response: &mut R,
        cancel: &CancellationToken,
    ) -> Result<HttpError, Error> {
        apikit::block_on(self.error_snapshot(response, cancel)).map_err(Error::Runtime)?
    }

    /// Reads the body of a response to completion and decodes it as text.
    ///
    /// The character set is determined by
    /// [`content_encoding_or`](crate::content_encoding_or), using this
    /// inspector's fallback.
    ///
    /// # Errors
    ///
    /// - [`Error::Cancelled`] if `cancel` fires before the body has been read.
    /// - [`Error::Decode`] if the character set is unknown or the body is not
    ///   valid in it.
    /// - [`Error::Transport`] if reading the body fails.
    pub async fn decode_body<R: HttpResponse + ?Sized>(
        &self,
        response: &mut R,
        cancel: &CancellationToken,
    ) -> Result<String, Error> {
        let content_headers = HeaderList::copy_from(response.content_headers());
        self.read_text(response, &content_headers, cancel).await
    }

    /// Blocking version of [`Inspector::decode_body`].
    ///
    /// # Errors
    ///
    /// As [`Inspector::decode_body`], plus [`Error::Runtime`] if
    /// called from a current-thread tokio runtime or if the blocking executor
    /// cannot be started (see [`apikit::block_on`]).
    pub fn decode_body_blocking<R: HttpResponse + ?Sized>(
        &self,
        response: &mut R,
        cancel: &CancellationToken,
    ) -> Result<String, Error> {
        apikit::block_on(self.decode_body(response, cancel)).map_err(Error::Runtime)?
    }

    async fn read_text<R: HttpResponse + ?Sized>(
        &self,
        response: &mut R,
        content_headers: &HeaderList,
        cancel: &CancellationToken,
    ) -> Result<String, Error> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        self.trace.before_read(
            content_headers.get_str(http::header::CONTENT_TYPE.as_str()),
            response.content_length(),
        );
        let charset = content_encoding_or(content_headers, Some(&self.fallback_encoding))
            .unwrap_or_else(|| self.fallback_encoding.clone());
        let encoding = lookup(&charset)?;

        let mut body = Vec::new();
        loop {
            let chunk = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(Error::Cancelled),
                chunk = response.next_chunk() => chunk.map_err(Error::Transport)?,
            };
            match chunk {
                Some(chunk) => body.extend_from_slice(&chunk),
                None => break,
            }
        }

        let text = decode_with(encoding, &body)?;
        self.trace.after_read(&text);
        Ok(text)
    }
}

impl HttpError {
    /// Takes a snapshot of a response using a default [`Inspector`].
    ///
    /// # Errors
    ///
    /// See [`Inspector::error_snapshot`].
    pub async fn from_response<R: HttpResponse + ?Sized>(
        response: &mut R,
        cancel: &CancellationToken,
    ) -> Result<Self, Error> {
        Inspector::new().error_snapshot(response, cancel).await
    }

    /// Blocking version of [`HttpError::from_response`].
    ///
    /// # Errors
    ///
    /// See [`Inspector::error_snapshot_blocking`].
    pub fn from_response_blocking<R: HttpResponse + ?Sized>(
        response: &mut R,
        cancel: &CancellationToken,
    ) -> Result<Self, Error> {
        Inspector::new().error_snapshot_blocking(response, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{BoxFuture, BufferedResponse, RequestContext, TransportError};
    use bytes::Bytes;
    use http::{StatusCode, Version};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    fn not_found() -> BufferedResponse {
        BufferedResponse::new(StatusCode::NOT_FOUND)
            .with_reason("Not Found")
            .with_version(Version::HTTP_11)
            .with_header("Server", "unit-test")
            .with_header("X-Request-Id", "abc123")
            .with_content_header("Content-Type", "application/json; charset=utf-8")
            .with_content_header("Content-Length", "27")
            .with_chunks([r#"{"error":"#, r#""no such release"}"#])
            .with_request(
                RequestContext::new("https://musicbrainz.example/ws/2/release/42")
                    .with_method("GET")
                    .with_header("Accept", "application/json"),
            )
    }

    /// Wraps a response and records when it is dropped.
    #[derive(Debug)]
    struct Tracked<'a> {
        inner: BufferedResponse,
        dropped: &'a AtomicBool,
    }

    impl Drop for Tracked<'_> {
        fn drop(&mut self) {
            self.dropped.store(true, Ordering::SeqCst);
        }
    }

    impl HttpResponse for Tracked<'_> {
        fn status(&self) -> StatusCode {
            self.inner.status()
        }
        fn reason(&self) -> Option<&str> {
            self.inner.reason()
        }
        fn version(&self) -> Option<Version> {
            self.inner.version()
        }
        fn headers(&self) -> crate::HeaderIter<'_> {
            self.inner.headers()
        }
        fn content_headers(&self) -> crate::HeaderIter<'_> {
            self.inner.content_headers()
        }
        fn next_chunk(&mut self) -> BoxFuture<'_, Result<Option<Bytes>, TransportError>> {
            self.inner.next_chunk()
        }
    }

    /// A response whose body yields one chunk and then either fails or stalls.
    #[derive(Debug)]
    struct Faulty {
        status: StatusCode,
        sent_first: bool,
        stall: bool,
    }

    impl HttpResponse for Faulty {
        fn status(&self) -> StatusCode {
            self.status
        }
        fn reason(&self) -> Option<&str> {
            None
        }
        fn version(&self) -> Option<Version> {
            None
        }
        fn headers(&self) -> crate::HeaderIter<'_> {
            Box::new(std::iter::empty())
        }
        fn content_headers(&self) -> crate::HeaderIter<'_> {
            Box::new(std::iter::empty())
        }
        fn next_chunk(&mut self) -> BoxFuture<'_, Result<Option<Bytes>, TransportError>> {
            if !self.sent_first {
                self.sent_first = true;
                return Box::pin(async { Ok::<_, TransportError>(Some(Bytes::from_static(b"partial"))) });
            }
            if self.stall {
                Box::pin(std::future::pending::<Result<Option<Bytes>, TransportError>>())
            } else {
                Box::pin(async { Err::<Option<Bytes>, TransportError>("connection reset".into()) })
            }
        }
    }

    #[derive(Debug, Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl BodyTrace for Recorder {
        fn before_read(&self, content_type: Option<&str>, content_length: Option<u64>) {
            self.events
                .lock()
                .unwrap()
                .push(format!("before {content_type:?} {content_length:?}"));
        }

        fn after_read(&self, text: &str) {
            self.events.lock().unwrap().push(format!("after {text}"));
        }
    }

    #[tokio::test]
    async fn test_success_passes_through_without_reading_body() {
        let inspector = Inspector::new();
        for code in [200, 201, 204, 250, 299] {
            let response = BufferedResponse::new(StatusCode::from_u16(code).unwrap()).with_body("kept");
            let mut response = inspector
                .ensure_successful(response, &CancellationToken::new())
                .await
                .unwrap();
            assert_eq!(response.status().as_u16(), code);
            assert_eq!(response.next_chunk().await.unwrap().unwrap(), "kept");
        }
    }

    #[tokio::test]
    async fn test_success_ignores_cancellation() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let response = BufferedResponse::new(StatusCode::OK);
        assert!(Inspector::new().ensure_successful(response, &cancel).await.is_ok());
    }

    #[tokio::test]
    async fn test_failure_status_is_preserved() {
        let inspector = Inspector::new();
        for code in [100, 101, 199, 300, 302, 400, 404, 418, 500, 503, 599] {
            let status = StatusCode::from_u16(code).unwrap();
            let err = inspector
                .ensure_successful(BufferedResponse::new(status), &CancellationToken::new())
                .await
                .unwrap_err();
            assert_eq!(err.status(), Some(status));
        }
    }

    #[tokio::test]
    async fn test_snapshot_captures_everything() {
        let err = Inspector::new()
            .ensure_successful(not_found(), &CancellationToken::new())
            .await
            .unwrap_err();
        let snapshot = err.http_error().unwrap();

        assert_eq!(snapshot.status(), StatusCode::NOT_FOUND);
        assert_eq!(snapshot.reason(), Some("Not Found"));
        assert_eq!(snapshot.version(), Some(Version::HTTP_11));
        assert_eq!(snapshot.content(), Some(r#"{"error":"no such release"}"#));
        assert_eq!(snapshot.message(), "HTTP/1.1 404 (NotFound) 'Not Found'");
        assert_eq!(
            snapshot.response_headers().unwrap().get_str("x-request-id"),
            Some("abc123")
        );
        assert_eq!(
            snapshot.content_headers().unwrap().get_str("content-type"),
            Some("application/json; charset=utf-8")
        );
        assert_eq!(snapshot.request_method(), Some("GET"));
        assert_eq!(
            snapshot.request_uri(),
            Some("https://musicbrainz.example/ws/2/release/42")
        );
        assert_eq!(
            snapshot.request_headers().unwrap().get_str("accept"),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_response_is_dropped_and_snapshot_survives() {
        let dropped = AtomicBool::new(false);
        let response = Tracked {
            inner: not_found(),
            dropped: &dropped,
        };
        let err = Inspector::new()
            .ensure_successful(response, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(dropped.load(Ordering::SeqCst));

        let snapshot = err.into_http_error().unwrap();
        assert_eq!(snapshot.content(), Some(r#"{"error":"no such release"}"#));
        assert_eq!(snapshot.response_headers().unwrap().get_str("server"), Some("unit-test"));
    }

    #[tokio::test]
    async fn test_snapshot_is_independent_of_later_mutation() {
        let mut response = not_found();
        let snapshot = Inspector::new()
            .error_snapshot(&mut response, &CancellationToken::new())
            .await
            .unwrap();

        response.headers_mut().append_unchecked("Server", "changed");
        response.content_headers_mut().append_unchecked("Content-Language", "en");
        response.request_mut().unwrap().uri = "https://elsewhere.example/".to_owned();
        drop(response);

        assert_eq!(snapshot.response_headers().unwrap().get_all("server").count(), 1);
        assert!(!snapshot.content_headers().unwrap().contains("content-language"));
        assert_eq!(
            snapshot.request_uri(),
            Some("https://musicbrainz.example/ws/2/release/42")
        );
    }

    #[tokio::test]
    async fn test_snapshot_content_matches_decoded_body() {
        let inspector = Inspector::new();
        let original = BufferedResponse::new(StatusCode::OK)
            .with_content_header("Content-Type", "text/plain; charset=iso-8859-1")
            .with_chunks([vec![0x63, 0x61], vec![0x66, 0xE9]]);

        let snapshot = inspector
            .error_snapshot(&mut original.clone(), &CancellationToken::new())
            .await
            .unwrap();
        let decoded = inspector
            .decode_body(&mut original.clone(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(decoded, "café");
        assert_eq!(snapshot.content(), Some(decoded.as_str()));
        assert_eq!(snapshot.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_headers_are_copied_verbatim() {
        let response = BufferedResponse::new(StatusCode::BAD_REQUEST)
            .with_header("X-Broken", b"evil\r\nvalue\x00".as_slice())
            .with_content_header("Content-Disposition", vec![0xFF, 0xFE]);
        let err = Inspector::new()
            .ensure_successful(response, &CancellationToken::new())
            .await
            .unwrap_err();
        let snapshot = err.http_error().unwrap();
        assert_eq!(
            snapshot.response_headers().unwrap().get("x-broken"),
            Some(b"evil\r\nvalue\x00".as_slice())
        );
        assert_eq!(
            snapshot.content_headers().unwrap().get("content-disposition"),
            Some([0xFF, 0xFE].as_slice())
        );
    }

    #[tokio::test]
    async fn test_cancelled_before_read() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let inspector = Inspector::new();

        let err = inspector.ensure_successful(not_found(), &cancel).await.unwrap_err();
        assert!(err.is_cancelled());
        assert!(err.http_error().is_none());

        let mut response = not_found();
        let err = inspector.decode_body(&mut response, &cancel).await.unwrap_err();
        assert!(err.is_cancelled());
        // Nothing was consumed.
        assert!(response.next_chunk().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_cancelled_mid_read() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });
        let response = Faulty {
            status: StatusCode::BAD_GATEWAY,
            sent_first: false,
            stall: true,
        };
        let err = Inspector::new()
            .ensure_successful(response, &cancel)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_transport_failure_takes_precedence() {
        let response = Faulty {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            sent_first: false,
            stall: false,
        };
        let err = Inspector::new()
            .ensure_successful(response, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(ref source) if source.to_string() == "connection reset"));
    }

    #[tokio::test]
    async fn test_decode_failure_takes_precedence() {
        let response = BufferedResponse::new(StatusCode::BAD_REQUEST)
            .with_content_header("Content-Encoding", "gzip")
            .with_body("irrelevant");
        let err = Inspector::new()
            .ensure_successful(response, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode(crate::DecodeError::UnknownEncoding(ref name)) if name == "gzip"));

        let mut invalid = BufferedResponse::new(StatusCode::OK).with_body(vec![0xC3, 0x28]);
        let err = Inspector::new()
            .decode_body(&mut invalid, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode(crate::DecodeError::Malformed { .. })));
    }

    #[tokio::test]
    async fn test_fallback_encoding() {
        let mut response = BufferedResponse::new(StatusCode::OK).with_body(vec![0xE9]);
        let text = Inspector::new()
            .with_fallback_encoding("windows-1252")
            .decode_body(&mut response, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(text, "é");
    }

    #[tokio::test]
    async fn test_snapshot_drops_utf8_bom() {
        let mut response = BufferedResponse::new(StatusCode::BAD_REQUEST)
            .with_content_header("Content-Type", "application/json; charset=utf-8")
            .with_body(&b"\xEF\xBB\xBF{\"error\":\"bad query\"}"[..]);
        let snapshot = Inspector::new()
            .error_snapshot(&mut response, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(snapshot.content(), Some(r#"{"error":"bad query"}"#));
    }

    #[tokio::test]
    async fn test_trace_receives_events() {
        let recorder = Arc::new(Recorder::default());
        let inspector = Inspector::new().with_trace(Arc::clone(&recorder));
        let mut response = BufferedResponse::new(StatusCode::OK)
            .with_content_header("Content-Type", "text/plain")
            .with_content_header("Content-Length", "5")
            .with_body("hello");
        let text = inspector
            .decode_body(&mut response, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(text, "hello");
        assert_eq!(
            *recorder.events.lock().unwrap(),
            [r#"before Some("text/plain") Some(5)"#, "after hello"]
        );
    }

    #[test]
    fn test_blocking_forms_match_async_forms() {
        let inspector = Inspector::new();
        let cancel = CancellationToken::new();

        let err = inspector.ensure_successful_blocking(not_found(), &cancel).unwrap_err();
        let blocking = err.into_http_error().unwrap();
        let nonblocking = apikit::block_on(inspector.error_snapshot(&mut not_found(), &cancel))
            .unwrap()
            .unwrap();
        assert_eq!(blocking, nonblocking);

        let snapshot = HttpError::from_response_blocking(&mut not_found(), &cancel).unwrap();
        assert_eq!(snapshot, blocking);

        let text = inspector.decode_body_blocking(&mut not_found(), &cancel).unwrap();
        assert_eq!(Some(text.as_str()), blocking.content());

        let ok = inspector
            .ensure_successful_blocking(BufferedResponse::new(StatusCode::OK), &cancel)
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_blocking_form_inside_multi_thread_runtime() {
        let snapshot = Inspector::new()
            .error_snapshot_blocking(&mut not_found(), &CancellationToken::new())
            .unwrap();
        assert_eq!(snapshot.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_blocking_form_refused_inside_current_thread_runtime() {
        let err = Inspector::new()
            .decode_body_blocking(&mut not_found(), &CancellationToken::new())
            .unwrap_err();
        assert!(matches!(err, Error::Runtime(ref io) if io.kind() == std::io::ErrorKind::WouldBlock));
        assert!(err.http_error().is_none());
    }

    #[test]
    fn test_blocking_forms_honour_cancellation() {
        let inspector = Inspector::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let mut response = not_found();
        let err = inspector.decode_body_blocking(&mut response, &cancel).unwrap_err();
        assert!(err.is_cancelled());

        let err = inspector.error_snapshot_blocking(&mut not_found(), &cancel).unwrap_err();
        assert!(err.is_cancelled());

        let err = inspector.ensure_successful_blocking(not_found(), &cancel).unwrap_err();
        assert!(err.is_cancelled());
        assert!(err.http_error().is_none());
    }

    #[test]
    fn test_blocking_form_cancelled_mid_read() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let mut response = Faulty {
            status: StatusCode::BAD_GATEWAY,
            sent_first: false,
            stall: true,
        };
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            trigger.cancel();
        });
        let err = Inspector::new().decode_body_blocking(&mut response, &cancel).unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_from_response() {
        let snapshot = HttpError::from_response(&mut not_found(), &CancellationToken::new())
            .await
            .unwrap()
            .with_message("release lookup failed");
        assert_eq!(snapshot.to_string(), "release lookup failed");
        assert_eq!(snapshot.status(), StatusCode::NOT_FOUND);
    }
}
